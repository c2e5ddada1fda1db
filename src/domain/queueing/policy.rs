//! Queueing policy - the baseline offsets used by the order calculator.

use serde::{Deserialize, Serialize};

/// Default baseline for conversations nobody is actively waiting on
/// (just transferred with no agent, or just closed). Large enough that
/// such conversations sort after anything freshly waiting.
pub const DEFAULT_LOW_PRIORITY_BASELINE: i64 = 9_000_000_000_000;

/// Default baseline for conversations freshly awaiting an agent; zero
/// keeps them in timestamp (FIFO) order among equal priorities.
pub const DEFAULT_HIGH_PRIORITY_BASELINE: i64 = 0;

/// Baseline offsets for queue-priority computation.
///
/// Passed into the metrics engine at construction; there are no ambient
/// globals for these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueingPolicy {
    /// Baseline when no one is actively waiting (deprioritize).
    pub low_priority_baseline: i64,
    /// Baseline when the conversation awaits an agent (FIFO serving).
    pub high_priority_baseline: i64,
}

impl QueueingPolicy {
    /// Creates a policy with explicit baselines.
    pub const fn new(low_priority_baseline: i64, high_priority_baseline: i64) -> Self {
        Self {
            low_priority_baseline,
            high_priority_baseline,
        }
    }
}

impl Default for QueueingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_PRIORITY_BASELINE, DEFAULT_HIGH_PRIORITY_BASELINE)
    }
}
