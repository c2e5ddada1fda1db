//! Update-coordinator configuration

use serde::Deserialize;

use crate::application::DEFAULT_MAX_CONFLICT_RETRIES;

use super::error::ValidationError;

/// Tuning for the conversation update coordinator.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// How many times a merge conflict is retried before giving up.
    #[serde(default = "default_max_conflict_retries")]
    pub max_conflict_retries: u32,
}

fn default_max_conflict_retries() -> u32 {
    DEFAULT_MAX_CONFLICT_RETRIES
}

impl EngineConfig {
    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=10).contains(&self.max_conflict_retries) {
            return Err(ValidationError::InvalidRetryLimit);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_conflict_retries: default_max_conflict_retries(),
        }
    }
}
