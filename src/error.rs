//! Error types for Hero Onboarding.

/// Top-level error type for the onboarding wizard.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Wiring error: {0}")]
    Wiring(#[from] WiringError),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// Configuration-related errors. Raised while reading the environment,
/// before any onboarding state exists.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Question catalog errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog contains no questions")]
    Empty,

    #[error("Duplicate question id: {0}")]
    DuplicateId(String),

    #[error("Question {id} is a select question but has no options")]
    MissingOptions { id: String },

    #[error("Question {id} allows \"other\" but has no \"other\" option")]
    MissingOtherOption { id: String },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Contract violations in how the flow is assembled.
///
/// These indicate a programming mistake rather than a runtime condition.
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Onboarding flow must be built with a store handle")]
    MissingStore,
}

/// Errors raised by a rendering surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Failed to read input on surface {name}: {source}")]
    Input {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output on surface {name}: {source}")]
    Output {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Inline input validation failures, shown next to the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid URL")]
    InvalidUrl,
}

/// Result type alias for the wizard.
pub type Result<T> = std::result::Result<T, Error>;
