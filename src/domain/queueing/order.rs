//! Priority-order calculator.
//!
//! Produces the numeric ranking key agent-queue consumers sort by
//! (ascending; lower serves sooner). The key has no absolute meaning,
//! only relative meaning within one queue.

use crate::domain::foundation::Timestamp;

/// Computes a conversation's queue ranking key.
///
/// `baseline + timestamp` anchors the key on the time axis; dividing by
/// `priority` means a higher-priority conversation yields a smaller key
/// and sorts earlier. Total over all inputs: a non-positive or absent
/// priority is coerced to 1, and a non-positive sum is coerced to 1.
pub fn compute_order(priority: i64, baseline: i64, timestamp: Timestamp) -> f64 {
    let priority = if priority <= 0 { 1 } else { priority };
    let mut sum = baseline.saturating_add(timestamp.as_epoch_ms());
    if sum <= 0 {
        sum = 1;
    }
    sum as f64 / priority as f64
}
