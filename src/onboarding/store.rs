//! Onboarding store — the single writer path for step and answers, with
//! broadcast of post-dispatch snapshots to whoever renders them.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info};
use uuid::Uuid;

use super::catalog::Catalog;
use super::state::{OnboardingAction, OnboardingState};

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Shared handle passed to every component that reads or dispatches.
pub type StoreHandle = Arc<OnboardingStore>;

/// Holds the session's [`OnboardingState`]; mutated only through dispatch.
pub struct OnboardingStore {
    session_id: Uuid,
    catalog: Arc<Catalog>,
    state: RwLock<OnboardingState>,
    tx: broadcast::Sender<OnboardingState>,
}

impl OnboardingStore {
    /// Create a store at step 0 with no answers.
    pub fn new(catalog: Arc<Catalog>) -> StoreHandle {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        let session_id = Uuid::new_v4();
        debug!(session = %session_id, questions = catalog.len(), "Onboarding store created");
        Arc::new(Self {
            session_id,
            catalog,
            state: RwLock::new(OnboardingState::default()),
            tx,
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Subscribe to snapshots published after each dispatch.
    pub fn subscribe(&self) -> broadcast::Receiver<OnboardingState> {
        self.tx.subscribe()
    }

    /// Current state.
    pub async fn snapshot(&self) -> OnboardingState {
        self.state.read().await.clone()
    }

    /// Apply one action and return the resulting state.
    pub async fn dispatch(&self, action: OnboardingAction) -> OnboardingState {
        self.dispatch_all([action]).await
    }

    /// Apply several actions under one lock; subscribers see only the
    /// final state.
    pub async fn dispatch_all(
        &self,
        actions: impl IntoIterator<Item = OnboardingAction>,
    ) -> OnboardingState {
        let mut state = self.state.write().await;
        self.apply_locked(&mut state, actions)
    }

    /// Apply the actions only while the question at the current step has
    /// `question_id`. Returns `None` when the user has moved on.
    pub async fn dispatch_for_question(
        &self,
        question_id: &str,
        actions: impl IntoIterator<Item = OnboardingAction>,
    ) -> Option<OnboardingState> {
        let mut state = self.state.write().await;
        let current = self.catalog.get(state.current_step).map(|q| q.id.as_str());
        if current != Some(question_id) {
            debug!(
                session = %self.session_id,
                question = question_id,
                step = state.current_step,
                "Dropping dispatch for question no longer shown"
            );
            return None;
        }
        Some(self.apply_locked(&mut state, actions))
    }

    fn apply_locked(
        &self,
        state: &mut OnboardingState,
        actions: impl IntoIterator<Item = OnboardingAction>,
    ) -> OnboardingState {
        let was_complete = state.is_complete;
        for action in actions {
            debug!(session = %self.session_id, action = %action, step = state.current_step, "Dispatch");
            state.apply(action, self.catalog.len());
        }
        if state.is_complete && !was_complete {
            info!(
                session = %self.session_id,
                answers = state.answers.len(),
                "Onboarding complete"
            );
        }

        let snapshot = state.clone();
        // Ok if nobody is listening
        let _ = self.tx.send(snapshot.clone());
        snapshot
    }
}
