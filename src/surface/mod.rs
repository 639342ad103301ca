//! Rendering surfaces — where screens are shown and user input comes from.

pub mod terminal;

use async_trait::async_trait;

use crate::error::SurfaceError;
use crate::onboarding::{CardEvent, CardOutcome, Screen};

pub use terminal::TerminalSurface;

/// One unit of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceInput {
    /// Events to apply in order.
    Events(Vec<CardEvent>),
    /// The user asked to leave.
    Quit,
}

/// A place the wizard is rendered to and read from.
#[async_trait]
pub trait Surface: Send {
    /// Surface name, for logs.
    fn name(&self) -> &str;

    /// Show a screen.
    async fn present(&mut self, screen: &Screen) -> Result<(), SurfaceError>;

    /// Report the outcome of an event that the next screen doesn't already
    /// make obvious.
    async fn notify(&mut self, outcome: &CardOutcome) -> Result<(), SurfaceError>;

    /// Wait for the next input. `None` once input has ended.
    ///
    /// Must be cancel-safe: the session drops this future when a store update
    /// arrives first.
    async fn next_input(&mut self) -> Result<Option<SurfaceInput>, SurfaceError>;
}
