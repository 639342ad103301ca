//! Hero Onboarding — step-by-step onboarding questionnaire.

pub mod config;
pub mod error;
pub mod onboarding;
pub mod session;
pub mod surface;
pub mod validation;
