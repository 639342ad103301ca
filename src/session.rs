//! Session loop — shows the current screen, feeds user input to the flow,
//! and re-renders when a deferred dispatch changes the store.

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Result;
use crate::onboarding::{CardOutcome, OnboardingFlow, OnboardingState};
use crate::surface::{Surface, SurfaceInput};

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The completion screen was shown.
    Completed,
    /// The user quit.
    Quit,
    /// Input ended with nothing left pending.
    InputClosed,
}

/// Final state of a session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub end: SessionEnd,
    pub state: OnboardingState,
}

/// Drive `flow` on `surface` until completion, quit, or end of input.
///
/// When input ends while an auto-advance is still pending, the session keeps
/// rendering until that advance lands.
pub async fn run_session<S>(flow: &mut OnboardingFlow, surface: &mut S) -> Result<SessionReport>
where
    S: Surface + ?Sized,
{
    let session_id = flow.store().session_id();
    let mut updates = flow.store().subscribe();
    let mut input_open = true;

    info!(
        session = %session_id,
        surface = surface.name(),
        questions = flow.store().catalog().len(),
        "Onboarding session started"
    );

    loop {
        // The screen below reflects everything published so far.
        loop {
            match updates.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        let screen = flow.screen().await;
        surface.present(&screen).await?;
        if screen.is_terminal() {
            return Ok(finish(flow, SessionEnd::Completed).await);
        }

        if !input_open {
            if flow.card().pending_advance().is_none() {
                // The advance may have landed after the screen above was taken.
                let screen = flow.screen().await;
                if screen.is_terminal() {
                    surface.present(&screen).await?;
                    return Ok(finish(flow, SessionEnd::Completed).await);
                }
                return Ok(finish(flow, SessionEnd::InputClosed).await);
            }
            match updates.recv().await {
                Ok(_) | Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return Ok(finish(flow, SessionEnd::InputClosed).await),
            }
        }

        tokio::select! {
            changed = updates.recv() => {
                if let Err(RecvError::Closed) = changed {
                    return Ok(finish(flow, SessionEnd::InputClosed).await);
                }
                debug!(session = %session_id, "Store changed, re-rendering");
            }
            input = surface.next_input() => match input? {
                None => {
                    debug!(session = %session_id, "Input closed");
                    input_open = false;
                }
                Some(SurfaceInput::Quit) => return Ok(finish(flow, SessionEnd::Quit).await),
                Some(SurfaceInput::Events(events)) => {
                    for event in events {
                        let outcome = flow.handle(event).await;
                        surface.notify(&outcome).await?;
                        if matches!(outcome, CardOutcome::Invalid(_) | CardOutcome::Unavailable) {
                            break;
                        }
                    }
                }
            },
        }
    }
}

async fn finish(flow: &OnboardingFlow, end: SessionEnd) -> SessionReport {
    let state = flow.store().snapshot().await;
    info!(
        session = %flow.store().session_id(),
        end = ?end,
        step = state.current_step,
        answers = state.answers.len(),
        "Onboarding session ended"
    );
    SessionReport {
        session_id: flow.store().session_id(),
        end,
        state,
    }
}
