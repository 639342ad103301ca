//! Flow controller — decides between the intro, a question card, and the
//! completion screen from the store's current step.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::config::WizardConfig;
use crate::error::WiringError;

use super::catalog::Catalog;
use super::completion::CompletionScreen;
use super::progress::Progress;
use super::renderer::{CardEvent, CardOutcome, CardView, QuestionCard};
use super::state::OnboardingState;
use super::store::{OnboardingStore, StoreHandle};

/// What the surface should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Question {
        /// Hidden on the intro.
        progress: Option<Progress>,
        card: CardView,
    },
    Completion(CompletionScreen),
    /// Step inside the catalog with no question behind it.
    Blank,
}

impl Screen {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completion(_))
    }
}

/// Which screen a state calls for, before any card is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Question { step: usize },
    Completion,
    Blank,
}

/// Pick the screen for `state`. Completion is "at or past the end", not
/// equality with the last index.
pub fn select_screen(state: &OnboardingState, catalog: &Catalog) -> ScreenKind {
    if state.is_past_end(catalog.len()) {
        return ScreenKind::Completion;
    }
    match catalog.get(state.current_step) {
        Some(_) => ScreenKind::Question {
            step: state.current_step,
        },
        None => ScreenKind::Blank,
    }
}

/// Progress shown above a question. The intro isn't counted, so the total
/// is one less than the catalog length.
pub fn progress_for(step: usize, catalog: &Catalog) -> Option<Progress> {
    (step > 0).then(|| Progress::new(step, catalog.len().saturating_sub(1)))
}

/// Reads store state, keeps the question card in sync with it, and routes
/// user events to the card.
pub struct OnboardingFlow {
    store: StoreHandle,
    card: QuestionCard,
}

impl OnboardingFlow {
    pub fn builder() -> OnboardingFlowBuilder {
        OnboardingFlowBuilder::default()
    }

    /// Build a flow over the configured catalog file, or the built-in
    /// catalog when none is set.
    pub fn from_config(config: &WizardConfig) -> crate::error::Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::hero_network(),
        };
        let flow = Self::builder()
            .store(OnboardingStore::new(Arc::new(catalog)))
            .config(config)
            .build()?;
        Ok(flow)
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn card(&self) -> &QuestionCard {
        &self.card
    }

    /// Sync the card to the current state and render.
    pub async fn screen(&mut self) -> Screen {
        let state = self.store.snapshot().await;
        match self.sync(&state) {
            ScreenKind::Completion => Screen::Completion(CompletionScreen::default()),
            ScreenKind::Blank => Screen::Blank,
            ScreenKind::Question { step } => match self.card.view() {
                Some(card) => Screen::Question {
                    progress: progress_for(step, self.store.catalog()),
                    card,
                },
                None => Screen::Blank,
            },
        }
    }

    /// Route one user event to the card. Nothing is accepted once complete.
    pub async fn handle(&mut self, event: CardEvent) -> CardOutcome {
        let state = self.store.snapshot().await;
        match self.sync(&state) {
            ScreenKind::Question { .. } => self.card.handle(event).await,
            ScreenKind::Completion | ScreenKind::Blank => CardOutcome::Unavailable,
        }
    }

    fn sync(&mut self, state: &OnboardingState) -> ScreenKind {
        let kind = select_screen(state, self.store.catalog());
        match kind {
            ScreenKind::Question { step } => {
                if let Some(question) = self.store.catalog().get(step) {
                    self.card.sync(step, question, state.answer(&question.id));
                }
            }
            ScreenKind::Completion | ScreenKind::Blank => self.card.clear(),
        }
        kind
    }
}

/// Assembles an [`OnboardingFlow`]. The store handle is mandatory.
#[derive(Default)]
pub struct OnboardingFlowBuilder {
    store: Option<StoreHandle>,
    auto_advance_delay: Option<Duration>,
}

impl OnboardingFlowBuilder {
    pub fn store(mut self, store: StoreHandle) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(mut self, config: &WizardConfig) -> Self {
        self.auto_advance_delay = Some(config.auto_advance_delay);
        self
    }

    pub fn auto_advance_delay(mut self, delay: Duration) -> Self {
        self.auto_advance_delay = Some(delay);
        self
    }

    pub fn build(self) -> Result<OnboardingFlow, WiringError> {
        let store = self.store.ok_or(WiringError::MissingStore)?;
        let delay = self
            .auto_advance_delay
            .unwrap_or_else(|| WizardConfig::default().auto_advance_delay);
        let card = QuestionCard::new(store.clone(), delay);
        Ok(OnboardingFlow { store, card })
    }
}
