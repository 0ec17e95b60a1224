//! Error types for branch build strategies.

use thiserror::Error;

/// Configuration and construction errors.
///
/// Evaluation itself never fails: strategies answer `false` for inputs they do not
/// handle, so these errors only surface while building or loading strategies.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Invalid regular expression /{pattern}/: {message}")]
    InvalidRegex { pattern: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for StrategyError {
    fn from(err: config::ConfigError) -> Self {
        StrategyError::ConfigError(err.to_string())
    }
}

impl From<toml::de::Error> for StrategyError {
    fn from(err: toml::de::Error) -> Self {
        StrategyError::ConfigError(err.to_string())
    }
}

impl StrategyError {
    pub(crate) fn invalid_regex(pattern: &str, err: &regex::Error) -> Self {
        StrategyError::InvalidRegex {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}
