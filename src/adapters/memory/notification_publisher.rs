//! In-memory notification publisher.
//!
//! Captures published envelopes for test assertions. A failing variant
//! exercises the coordinator's log-and-drop policy.
//!
//! # Panics
//!
//! Methods panic if internal locks are poisoned. Acceptable for test
//! code; production deployments publish to the platform's pub/sub.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::NotificationPublisher;

/// In-memory notification capture.
#[derive(Default)]
pub struct InMemoryNotificationPublisher {
    published: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryNotificationPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all published envelopes (for test assertions).
    pub fn published(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .expect("InMemoryNotificationPublisher: lock poisoned")
            .clone()
    }

    /// Returns published envelopes of one event type.
    pub fn published_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// True if at least one envelope of the given type was published.
    pub fn has_published(&self, event_type: &str) -> bool {
        !self.published_of_type(event_type).is_empty()
    }
}

#[async_trait]
impl NotificationPublisher for InMemoryNotificationPublisher {
    async fn publish(&self, event: &EventEnvelope) -> Result<(), DomainError> {
        self.published
            .write()
            .expect("InMemoryNotificationPublisher: lock poisoned")
            .push(event.clone());
        Ok(())
    }
}

/// Publisher that rejects every envelope.
#[derive(Default)]
pub struct FailingNotificationPublisher;

#[async_trait]
impl NotificationPublisher for FailingNotificationPublisher {
    async fn publish(&self, _event: &EventEnvelope) -> Result<(), DomainError> {
        Err(DomainError::new(
            ErrorCode::NotificationError,
            "publisher unavailable",
        ))
    }
}
