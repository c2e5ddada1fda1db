//! Conversation store port.
//!
//! The update coordinator reads a snapshot, computes a delta, and merges
//! it back through this port. The merge is versioned: the store compares
//! `expected_version` against the stored conversation and refuses the
//! write with a retryable conflict when they differ, so a coordinator
//! that lost a race re-reads and recomputes instead of overwriting.

use async_trait::async_trait;

use crate::domain::conversation::{Conversation, ConversationDelta};
use crate::domain::foundation::{ConversationId, DomainError};

/// Port for reading and atomically patching conversations.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Fetch the latest snapshot of a conversation.
    ///
    /// Must reflect every previously applied delta; the metrics engine's
    /// correctness depends on reading its own writes.
    async fn get(&self, id: &ConversationId) -> Result<Conversation, DomainError>;

    /// Merge a delta into the stored conversation.
    ///
    /// Atomic relative to concurrent merges for the same id. Fails with
    /// `ErrorCode::ConflictRetry` when `expected_version` no longer
    /// matches; the caller re-reads and recomputes. Returns the
    /// post-merge snapshot.
    async fn apply_delta(
        &self,
        id: &ConversationId,
        expected_version: u64,
        delta: &ConversationDelta,
    ) -> Result<Conversation, DomainError>;

    /// Insert a new conversation. Fails if the id already exists.
    async fn insert(&self, conversation: Conversation) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_is_object_safe() {
        fn assert_object_safe(_: &dyn ConversationStore) {}
        let _ = assert_object_safe;
    }
}
