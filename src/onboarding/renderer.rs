//! Question card — the input widget for the current question.
//!
//! The card keeps transient, card-local state (the draft answer, the
//! free-text "other" value, and an inline validation error) and turns user
//! events into store dispatches. Local state is resynchronized explicitly
//! through [`QuestionCard::sync`] whenever the shown question or its stored
//! answer changes:
//!
//! - text questions always start with an empty draft, even on revisits
//! - select questions take their draft from the stored answer
//!
//! The first question is rendered as a static intro panel with a single
//! Start action.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::error::ValidationError;
use crate::validation::validate_email;

use super::advance::PendingAdvance;
use super::model::{Answer, Question, QuestionKind};
use super::state::OnboardingAction;
use super::store::StoreHandle;

/// Placeholder for the revealed "other" text field.
pub const OTHER_PLACEHOLDER: &str = "Please specify...";

/// Uncommitted answer held by the card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Draft {
    #[default]
    Empty,
    Single(String),
    Multiple(Vec<String>),
}

impl Draft {
    fn from_answer(answer: Option<&Answer>) -> Self {
        match answer {
            None => Self::Empty,
            Some(Answer::Single(s)) => Self::Single(s.clone()),
            Some(Answer::Multiple(v)) => Self::Multiple(v.clone()),
        }
    }

    /// Empty text and empty selections both count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Single(s) => s.is_empty(),
            Self::Multiple(v) => v.is_empty(),
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            _ => None,
        }
    }

    /// Whether `value` is the picked single value or one of the picked
    /// multiple values.
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Empty => false,
            Self::Single(s) => s == value,
            Self::Multiple(v) => v.iter().any(|x| x == value),
        }
    }

    /// Add `value` if absent, remove it if present. Insertion order is kept.
    fn toggle(&mut self, value: &str) {
        let mut values = match std::mem::take(self) {
            Self::Multiple(v) => v,
            _ => Vec::new(),
        };
        match values.iter().position(|v| v == value) {
            Some(index) => {
                values.remove(index);
            }
            None => values.push(value.to_string()),
        }
        *self = Self::Multiple(values);
    }

    fn to_answer(&self) -> Answer {
        match self {
            Self::Empty => Answer::empty(),
            Self::Single(s) => Answer::Single(s.clone()),
            Self::Multiple(v) => Answer::Multiple(v.clone()),
        }
    }
}

/// A user interaction with the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEvent {
    /// The intro's Start button.
    Start,
    /// Keystrokes in the text field (the full new value).
    Input(String),
    /// Keystrokes in the revealed "other" field.
    InputOther(String),
    /// Click on a single-select option.
    Select(String),
    /// Click on a multi-select option.
    Toggle(String),
    Next,
    Back,
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOutcome {
    /// Card-local state changed; nothing dispatched.
    Updated,
    /// An auto-advance is pending.
    Scheduled,
    /// The answer was stored and the step advanced.
    Advanced,
    /// Validation failed; the step is unchanged.
    Invalid(ValidationError),
    WentBack,
    /// The event isn't offered by the card in its current state.
    Unavailable,
}

/// Static welcome panel shown for the first question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntroPanel {
    pub title: &'static str,
    pub highlight: &'static str,
    pub body: &'static str,
    pub duration_hint: &'static str,
    pub start_label: &'static str,
    pub footnote: &'static str,
}

impl Default for IntroPanel {
    fn default() -> Self {
        Self {
            title: "Let's share your",
            highlight: "video stories",
            body: "Answer a few questions to help us understand your business and create a \
                   personalized video content strategy.",
            duration_hint: "Takes about 3 minutes to complete",
            start_label: "Start Your Video Journey",
            footnote: "Your information helps us create a tailored experience for your business",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "widget", rename_all = "kebab-case")]
pub enum InputView {
    Text {
        value: String,
        placeholder: Option<String>,
        /// Rendered as an email input.
        email: bool,
    },
    SingleSelect {
        options: Vec<OptionView>,
    },
    MultiSelect {
        options: Vec<OptionView>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtherField {
    pub value: String,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextButton {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPanel {
    pub question_id: String,
    pub prompt: String,
    pub description: Option<String>,
    pub input: InputView,
    /// Present while "other" is the drafted option.
    pub other: Option<OtherField>,
    pub error: Option<String>,
    pub show_back: bool,
    /// Absent when the question auto-advances.
    pub next: Option<NextButton>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "card", rename_all = "snake_case")]
pub enum CardView {
    Intro(IntroPanel),
    Question(QuestionPanel),
}

/// The input card for whichever question the flow is showing.
pub struct QuestionCard {
    store: StoreHandle,
    auto_advance_delay: Duration,
    step: usize,
    question: Option<Question>,
    synced_answer: Option<Answer>,
    draft: Draft,
    other_value: String,
    error: Option<ValidationError>,
    pending: Option<PendingAdvance>,
}

impl QuestionCard {
    pub fn new(store: StoreHandle, auto_advance_delay: Duration) -> Self {
        Self {
            store,
            auto_advance_delay,
            step: 0,
            question: None,
            synced_answer: None,
            draft: Draft::Empty,
            other_value: String::new(),
            error: None,
            pending: None,
        }
    }

    /// Point the card at the question for `step` and reconcile local state
    /// with the stored `answer`.
    pub fn sync(&mut self, step: usize, question: &Question, answer: Option<&Answer>) {
        let same_question = self.step == step
            && self.question.as_ref().is_some_and(|q| q.id == question.id);

        if !same_question {
            self.cancel_pending();
            debug!(step, question = %question.id, kind = %question.kind, "Card shows new question");
            self.step = step;
            self.question = Some(question.clone());
            self.other_value.clear();
            self.error = None;
            self.synced_answer = answer.cloned();
            self.draft = match question.kind {
                QuestionKind::Text => Draft::Empty,
                _ => Draft::from_answer(answer),
            };
            return;
        }

        if self.synced_answer.as_ref() != answer {
            self.synced_answer = answer.cloned();
            if question.kind != QuestionKind::Text {
                self.draft = Draft::from_answer(answer);
            }
        }
    }

    /// Detach from any question, cancelling a pending auto-advance.
    pub fn clear(&mut self) {
        self.cancel_pending();
        self.question = None;
        self.synced_answer = None;
        self.draft = Draft::Empty;
        self.other_value.clear();
        self.error = None;
    }

    pub fn is_intro(&self) -> bool {
        self.question.is_some() && self.step == 0
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn other_value(&self) -> &str {
        &self.other_value
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Question id of a not-yet-fired auto-advance.
    pub fn pending_advance(&self) -> Option<&str> {
        self.pending
            .as_ref()
            .filter(|p| !p.is_finished())
            .map(|p| p.question_id())
    }

    /// Handle one user event.
    pub async fn handle(&mut self, event: CardEvent) -> CardOutcome {
        let Some(question) = self.question.clone() else {
            return CardOutcome::Unavailable;
        };

        if self.is_intro() {
            return match event {
                CardEvent::Start | CardEvent::Next => self.start(&question).await,
                _ => CardOutcome::Unavailable,
            };
        }

        match event {
            CardEvent::Start => CardOutcome::Unavailable,
            CardEvent::Input(text) => self.input(&question, text),
            CardEvent::InputOther(text) => self.input_other(&question, text),
            CardEvent::Select(value) => self.select(&question, value),
            CardEvent::Toggle(value) => self.toggle(&question, &value),
            CardEvent::Next => self.next(&question).await,
            CardEvent::Back => self.back().await,
        }
    }

    async fn start(&mut self, question: &Question) -> CardOutcome {
        self.store
            .dispatch_all([
                OnboardingAction::set_answer(question.id.clone(), Answer::empty()),
                OnboardingAction::NextStep,
            ])
            .await;
        CardOutcome::Advanced
    }

    fn input(&mut self, question: &Question, text: String) -> CardOutcome {
        if question.kind != QuestionKind::Text {
            return CardOutcome::Unavailable;
        }
        self.draft = Draft::Single(text);
        self.error = None;
        CardOutcome::Updated
    }

    fn input_other(&mut self, question: &Question, text: String) -> CardOutcome {
        if !self.other_revealed(question) {
            return CardOutcome::Unavailable;
        }
        self.other_value = text;
        CardOutcome::Updated
    }

    fn select(&mut self, question: &Question, value: String) -> CardOutcome {
        if question.kind != QuestionKind::SingleSelect || question.option(&value).is_none() {
            return CardOutcome::Unavailable;
        }

        // A new pick supersedes any advance still pending.
        self.cancel_pending();
        self.draft = Draft::Single(value.clone());

        if question.is_other(&value) {
            return CardOutcome::Updated;
        }

        self.pending = Some(PendingAdvance::schedule(
            self.store.clone(),
            question.id.clone(),
            Answer::Single(value),
            self.auto_advance_delay,
        ));
        CardOutcome::Scheduled
    }

    fn toggle(&mut self, question: &Question, value: &str) -> CardOutcome {
        if question.kind != QuestionKind::MultiSelect || question.option(value).is_none() {
            return CardOutcome::Unavailable;
        }
        self.draft.toggle(value);
        CardOutcome::Updated
    }

    async fn next(&mut self, question: &Question) -> CardOutcome {
        if !self.next_visible(question) || !self.next_enabled(question) {
            return CardOutcome::Unavailable;
        }

        if question.validates_email() {
            let email = self.draft.as_single().unwrap_or_default();
            if let Err(e) = validate_email(email) {
                debug!(question = %question.id, error = %e, "Answer rejected");
                self.error = Some(e);
                return CardOutcome::Invalid(e);
            }
        }

        // "other" answers store the literal option value, not the free text.
        let answer = self.draft.to_answer();
        self.cancel_pending();
        self.store
            .dispatch_all([
                OnboardingAction::set_answer(question.id.clone(), answer),
                OnboardingAction::NextStep,
            ])
            .await;
        self.error = None;
        if question.kind == QuestionKind::Text {
            self.draft = Draft::Empty;
        }
        CardOutcome::Advanced
    }

    async fn back(&mut self) -> CardOutcome {
        self.cancel_pending();
        self.store.dispatch(OnboardingAction::PrevStep).await;
        CardOutcome::WentBack
    }

    fn other_revealed(&self, question: &Question) -> bool {
        self.draft
            .as_single()
            .is_some_and(|value| question.is_other(value))
    }

    fn next_visible(&self, question: &Question) -> bool {
        match question.kind {
            QuestionKind::Text | QuestionKind::MultiSelect => true,
            QuestionKind::SingleSelect => self.other_revealed(question),
        }
    }

    fn next_enabled(&self, question: &Question) -> bool {
        if self.draft.is_empty() {
            return false;
        }
        !(self.other_revealed(question) && self.other_value.is_empty())
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    /// Render the card for the question it is synced to.
    pub fn view(&self) -> Option<CardView> {
        let question = self.question.as_ref()?;
        if self.is_intro() {
            return Some(CardView::Intro(IntroPanel::default()));
        }

        let options = || -> Vec<OptionView> {
            question
                .options
                .iter()
                .map(|o| OptionView {
                    value: o.value.clone(),
                    label: o.label.clone(),
                    selected: self.draft.contains(&o.value),
                })
                .collect()
        };
        let input = match question.kind {
            QuestionKind::Text => InputView::Text {
                value: self.draft.as_single().unwrap_or_default().to_string(),
                placeholder: question.placeholder.clone(),
                email: question.validates_email(),
            },
            QuestionKind::SingleSelect => InputView::SingleSelect { options: options() },
            QuestionKind::MultiSelect => InputView::MultiSelect { options: options() },
        };

        let other = self.other_revealed(question).then(|| OtherField {
            value: self.other_value.clone(),
            placeholder: OTHER_PLACEHOLDER,
        });
        let next = self.next_visible(question).then(|| NextButton {
            enabled: self.next_enabled(question),
        });

        Some(CardView::Question(QuestionPanel {
            question_id: question.id.clone(),
            prompt: question.text.clone(),
            description: question.description.clone(),
            input,
            other,
            error: self.error.map(|e| e.to_string()),
            show_back: true,
            next,
        }))
    }
}

impl Drop for QuestionCard {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
