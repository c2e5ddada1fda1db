//! Queueing module - Priority ranking of conversations in agent queues.

mod order;
mod policy;

pub use order::compute_order;
pub use policy::{
    QueueingPolicy, DEFAULT_HIGH_PRIORITY_BASELINE, DEFAULT_LOW_PRIORITY_BASELINE,
};
