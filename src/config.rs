//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default delay before a single-select pick advances to the next question.
pub const DEFAULT_AUTO_ADVANCE_MS: u64 = 300;

/// Wizard configuration.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Visual-feedback delay between picking a single-select option and
    /// moving on.
    pub auto_advance_delay: Duration,
    /// JSON file replacing the built-in question catalog.
    pub catalog_path: Option<PathBuf>,
    /// Directory for log files. Logs go to stderr when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            auto_advance_delay: Duration::from_millis(DEFAULT_AUTO_ADVANCE_MS),
            catalog_path: None,
            log_dir: None,
        }
    }
}

impl WizardConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// Reads `ONBOARDING_AUTO_ADVANCE_MS`, `ONBOARDING_CATALOG` and
    /// `ONBOARDING_LOG_DIR`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let auto_advance_delay = match get("ONBOARDING_AUTO_ADVANCE_MS") {
            Some(raw) => {
                let ms: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::InvalidValue {
                        key: "ONBOARDING_AUTO_ADVANCE_MS".to_string(),
                        message: format!("{raw:?} is not a number of milliseconds: {e}"),
                    })?;
                Duration::from_millis(ms)
            }
            None => Duration::from_millis(DEFAULT_AUTO_ADVANCE_MS),
        };

        Ok(Self {
            auto_advance_delay,
            catalog_path: get("ONBOARDING_CATALOG").map(PathBuf::from),
            log_dir: get("ONBOARDING_LOG_DIR").map(PathBuf::from),
        })
    }
}
