//! Progress indicator — "Question n of m" with a percentage and a bar.

use serde::Serialize;

/// Width of the rendered bar in cells.
pub const DEFAULT_BAR_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(current: usize, total: usize) -> Self {
        Self { current, total }
    }

    /// Fraction complete. A zero total reads as no progress.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.current as f64 / self.total as f64
    }

    /// Rounded percentage.
    pub fn percent(&self) -> u32 {
        (self.ratio() * 100.0).round() as u32
    }

    pub fn label(&self) -> String {
        format!("Question {} of {}", self.current, self.total)
    }

    /// A `width`-cell bar filled in proportion to [`Self::ratio`].
    pub fn bar(&self, width: usize) -> String {
        let filled = ((self.ratio() * width as f64).round() as usize).min(width);
        format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}  {}% Complete", self.label(), self.percent())
    }
}
