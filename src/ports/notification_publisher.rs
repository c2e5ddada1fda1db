//! Notification publisher port.
//!
//! Delivery is best-effort: the coordinator logs and discards publish
//! failures rather than failing the metric application. Implementations
//! must not assume every event arrives.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for forwarding conversation notifications to pub/sub.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Publish one event envelope.
    async fn publish(&self, event: &EventEnvelope) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publisher_is_object_safe() {
        fn assert_object_safe(_: &dyn NotificationPublisher) {}
        let _ = assert_object_safe;
    }
}
