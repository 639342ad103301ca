//! Deferred auto-advance for single-select answers.
//!
//! Picking an option stores the answer and moves on after a short delay so
//! the selection is visible first. The pending dispatch is cancelable and is
//! tied to the question it was scheduled for: it is aborted when the handle
//! is cancelled or dropped, and the store discards it if the user has left
//! that question by the time it fires.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::model::Answer;
use super::state::OnboardingAction;
use super::store::StoreHandle;

/// A scheduled `SET_ANSWER` + `NEXT_STEP` pair.
#[derive(Debug)]
pub struct PendingAdvance {
    question_id: String,
    handle: JoinHandle<()>,
}

impl PendingAdvance {
    /// Schedule the answer for `question_id` to be stored and the step
    /// advanced after `delay`.
    pub fn schedule(
        store: StoreHandle,
        question_id: impl Into<String>,
        answer: Answer,
        delay: Duration,
    ) -> Self {
        let question_id = question_id.into();
        let captured = question_id.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let actions = [
                OnboardingAction::set_answer(captured.clone(), answer),
                OnboardingAction::NextStep,
            ];
            if store.dispatch_for_question(&captured, actions).await.is_none() {
                debug!(question = %captured, "Stale auto-advance discarded");
            }
        });
        Self {
            question_id,
            handle,
        }
    }

    /// The question this advance was scheduled for.
    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    /// Whether the deferred dispatch has already run (or was aborted).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the pending dispatch.
    pub fn cancel(self) {
        if !self.handle.is_finished() {
            debug!(question = %self.question_id, "Auto-advance cancelled");
        }
        // Drop aborts
    }
}

impl Drop for PendingAdvance {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::onboarding::catalog::Catalog;
    use crate::onboarding::model::{AnswerOption, Question};
    use crate::onboarding::store::OnboardingStore;

    const DELAY: Duration = Duration::from_millis(20);
    const SETTLE: Duration = Duration::from_millis(200);

    fn store_at_role() -> StoreHandle {
        let catalog = Catalog::new(vec![
            Question::text("name", "Name?"),
            Question::single_select(
                "role",
                "Role?",
                vec![AnswerOption::new("a", "A"), AnswerOption::new("b", "B")],
            ),
            Question::text("done", "Anything else?"),
        ])
        .unwrap();
        OnboardingStore::new(Arc::new(catalog))
    }

    #[tokio::test]
    async fn fires_after_delay() {
        let store = store_at_role();
        store.dispatch(OnboardingAction::NextStep).await;

        let pending = PendingAdvance::schedule(Arc::clone(&store), "role", "a".into(), DELAY);
        assert_eq!(pending.question_id(), "role");
        assert_eq!(store.snapshot().await.current_step, 1);

        tokio::time::sleep(SETTLE).await;
        assert!(pending.is_finished());
        let state = store.snapshot().await;
        assert_eq!(state.current_step, 2);
        assert_eq!(state.answer("role"), Some(&Answer::from("a")));
    }

    #[tokio::test]
    async fn cancel_prevents_dispatch() {
        let store = store_at_role();
        store.dispatch(OnboardingAction::NextStep).await;

        let pending = PendingAdvance::schedule(Arc::clone(&store), "role", "a".into(), DELAY);
        pending.cancel();

        tokio::time::sleep(SETTLE).await;
        let state = store.snapshot().await;
        assert_eq!(state.current_step, 1);
        assert!(state.answer("role").is_none());
    }

    #[tokio::test]
    async fn drop_prevents_dispatch() {
        let store = store_at_role();
        store.dispatch(OnboardingAction::NextStep).await;

        drop(PendingAdvance::schedule(Arc::clone(&store), "role", "a".into(), DELAY));

        tokio::time::sleep(SETTLE).await;
        assert_eq!(store.snapshot().await.current_step, 1);
    }

    #[tokio::test]
    async fn stale_advance_is_discarded_after_navigation() {
        let store = store_at_role();
        store.dispatch(OnboardingAction::NextStep).await;

        let pending = PendingAdvance::schedule(Arc::clone(&store), "role", "a".into(), DELAY);
        // User goes back without the handle being cancelled.
        store.dispatch(OnboardingAction::PrevStep).await;

        tokio::time::sleep(SETTLE).await;
        assert!(pending.is_finished());
        let state = store.snapshot().await;
        assert_eq!(state.current_step, 0);
        assert!(state.answer("role").is_none());
    }
}
