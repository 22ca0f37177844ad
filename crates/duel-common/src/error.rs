//! Error types shared across the Duel workspace

use thiserror::Error;

/// Result type alias for Duel operations
pub type Result<T> = std::result::Result<T, DuelError>;

/// Main error type for Duel
#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DuelError {
    /// Create a configuration error for an environment variable that failed to parse
    pub fn invalid_env(name: &str, value: &str) -> Self {
        Self::Config(format!("{} has an invalid value: '{}'", name, value))
    }
}
