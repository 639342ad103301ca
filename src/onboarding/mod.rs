//! Onboarding questionnaire — first-visit flow.
//!
//! The user walks an ordered catalog of questions. A single store holds the
//! step index and collected answers and is mutated only through dispatched
//! actions; the flow controller reads it to pick the screen, and the question
//! card turns user events back into actions.

pub mod advance;
pub mod catalog;
pub mod completion;
pub mod flow;
pub mod model;
pub mod progress;
pub mod renderer;
pub mod state;
pub mod store;

pub use catalog::Catalog;
pub use completion::CompletionScreen;
pub use flow::{OnboardingFlow, OnboardingFlowBuilder, Screen};
pub use model::{Answer, AnswerOption, Question, QuestionKind};
pub use progress::Progress;
pub use renderer::{CardEvent, CardOutcome, CardView, QuestionCard};
pub use state::{OnboardingAction, OnboardingState};
pub use store::{OnboardingStore, StoreHandle};
