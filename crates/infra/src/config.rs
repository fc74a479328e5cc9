//! Process configuration, read from the environment.

use std::time::Duration;

use thiserror::Error;

pub use workshop_observability::LogFormat;

pub const WORK_DELAY_ENV: &str = "WORKSHOP_WORK_DELAY_MS";
pub const LOG_FORMAT_ENV: &str = "WORKSHOP_LOG_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got '{value}'")]
    InvalidDelay { var: &'static str, value: String },

    #[error("{var} must be 'json' or 'text', got '{value}'")]
    InvalidLogFormat { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshopConfig {
    /// How long each piece of factory work takes.
    pub work_delay: Duration,
    pub log_format: LogFormat,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        Self {
            work_delay: Duration::ZERO,
            log_format: LogFormat::Text,
        }
    }
}

impl WorkshopConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(WORK_DELAY_ENV) {
            let millis = value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidDelay {
                var: WORK_DELAY_ENV,
                value: value.clone(),
            })?;
            config.work_delay = Duration::from_millis(millis);
        }

        if let Some(value) = lookup(LOG_FORMAT_ENV) {
            config.log_format = value.trim().parse().map_err(|_| ConfigError::InvalidLogFormat {
                var: LOG_FORMAT_ENV,
                value: value.clone(),
            })?;
        }

        Ok(config)
    }
}
