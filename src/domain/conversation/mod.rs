//! Conversation module - aggregate, activities, and the metrics engine.

mod activity;
mod conversation;
mod delta;
mod engine;

pub use activity::{Activity, ActivityKind, ChannelKind, Identity, IdentityKind};
pub use conversation::{Conversation, ConversationState, SlaMetrics};
pub use delta::{ConversationDelta, MetricsDelta, NotifyIntent, Patch};
pub use engine::{ActivityMetricsEngine, EngineOutput};
