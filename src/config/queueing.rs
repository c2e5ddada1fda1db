//! Queueing policy configuration

use serde::Deserialize;

use crate::domain::queueing::{
    QueueingPolicy, DEFAULT_HIGH_PRIORITY_BASELINE, DEFAULT_LOW_PRIORITY_BASELINE,
};

use super::error::ValidationError;

/// Baseline offsets used by the priority-order calculator.
///
/// `low_priority_baseline` must stay large relative to real epoch-ms
/// timestamps; queue consumers sort ascending, and this constant is what
/// pushes idle conversations behind actively waiting ones.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueingConfig {
    /// Baseline for conversations nobody is waiting on.
    #[serde(default = "default_low_priority_baseline")]
    pub low_priority_baseline: i64,

    /// Baseline for conversations actively awaiting an agent.
    #[serde(default = "default_high_priority_baseline")]
    pub high_priority_baseline: i64,
}

fn default_low_priority_baseline() -> i64 {
    DEFAULT_LOW_PRIORITY_BASELINE
}

fn default_high_priority_baseline() -> i64 {
    DEFAULT_HIGH_PRIORITY_BASELINE
}

impl QueueingConfig {
    /// The configured baselines as an engine policy.
    pub fn policy(&self) -> QueueingPolicy {
        QueueingPolicy::new(self.low_priority_baseline, self.high_priority_baseline)
    }

    /// Validate queueing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.low_priority_baseline < 0 || self.high_priority_baseline < 0 {
            return Err(ValidationError::NegativeBaseline);
        }
        if self.low_priority_baseline <= self.high_priority_baseline {
            return Err(ValidationError::BaselinesInverted);
        }
        Ok(())
    }
}

impl Default for QueueingConfig {
    fn default() -> Self {
        Self {
            low_priority_baseline: default_low_priority_baseline(),
            high_priority_baseline: default_high_priority_baseline(),
        }
    }
}
