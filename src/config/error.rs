//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Priority baselines must be non-negative")]
    NegativeBaseline,

    #[error("Low-priority baseline must exceed the high-priority baseline")]
    BaselinesInverted,

    #[error("Merge-conflict retry limit must be between 1 and 10")]
    InvalidRetryLimit,
}
