//! Completion screen copy.

use serde::Serialize;

/// Static confirmation shown once every question is answered. The call to
/// action is display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionScreen {
    pub title: &'static str,
    pub message: &'static str,
    pub call_to_action: &'static str,
    pub footnote: &'static str,
}

impl Default for CompletionScreen {
    fn default() -> Self {
        Self {
            title: "Welcome to Hero Network!",
            message: "Thank you for completing your profile. We're excited to help you \
                      create amazing video content for your business.",
            call_to_action: "Schedule Your First Session",
            footnote: "Our team will review your information and reach out within 24 hours.",
        }
    }
}
