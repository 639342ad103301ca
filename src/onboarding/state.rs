//! Onboarding state machine — step position, collected answers, completion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::Answer;

/// The four transitions the store accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnboardingAction {
    NextStep,
    PrevStep,
    SetAnswer {
        #[serde(rename = "questionId")]
        question_id: String,
        answer: Answer,
    },
    /// Marks completion without moving. Not used by the flow.
    Complete,
}

impl OnboardingAction {
    pub fn set_answer(question_id: impl Into<String>, answer: impl Into<Answer>) -> Self {
        Self::SetAnswer {
            question_id: question_id.into(),
            answer: answer.into(),
        }
    }
}

impl std::fmt::Display for OnboardingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NextStep => "NEXT_STEP",
            Self::PrevStep => "PREV_STEP",
            Self::SetAnswer { .. } => "SET_ANSWER",
            Self::Complete => "COMPLETE",
        };
        write!(f, "{s}")
    }
}

/// Navigation position and collected answers for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingState {
    /// Index into the catalog. May run past the last question.
    pub current_step: usize,
    /// Answers keyed by question id. Entries are overwritten, never removed.
    pub answers: BTreeMap<String, Answer>,
    /// Set once `current_step` passes the last question; cleared on back.
    pub is_complete: bool,
}

impl OnboardingState {
    /// Apply one action. `question_count` is the catalog length.
    pub fn apply(&mut self, action: OnboardingAction, question_count: usize) {
        match action {
            OnboardingAction::NextStep => {
                self.current_step += 1;
                if self.current_step >= question_count {
                    self.is_complete = true;
                }
            }
            OnboardingAction::PrevStep => {
                self.current_step = self.current_step.saturating_sub(1);
                self.is_complete = false;
            }
            OnboardingAction::SetAnswer {
                question_id,
                answer,
            } => {
                self.answers.insert(question_id, answer);
            }
            OnboardingAction::Complete => {
                self.is_complete = true;
            }
        }
    }

    /// Stored answer for a question, if any.
    pub fn answer(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    /// Whether the step is at or past the end of a catalog of `question_count`.
    pub fn is_past_end(&self, question_count: usize) -> bool {
        self.current_step >= question_count
    }
}
