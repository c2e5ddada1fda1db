//! In-memory conversation store.
//!
//! Backs integration tests and local development. The versioned merge
//! mirrors what a database adapter does with a compare-and-set on the
//! row version.
//!
//! # Panics
//!
//! Methods panic if internal locks are poisoned. Acceptable for test
//! code; production deployments use a database-backed adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::conversation::{Conversation, ConversationDelta};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};
use crate::ports::ConversationStore;

/// In-memory, version-checked conversation store.
#[derive(Default)]
pub struct InMemoryConversationStore {
    conversations: RwLock<HashMap<ConversationId, Conversation>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given conversations.
    pub fn seeded(conversations: impl IntoIterator<Item = Conversation>) -> Self {
        let store = Self::new();
        {
            let mut map = store
                .conversations
                .write()
                .expect("InMemoryConversationStore: lock poisoned");
            for conversation in conversations {
                map.insert(conversation.id, conversation);
            }
        }
        store
    }

    /// Number of stored conversations (for test assertions).
    pub fn len(&self) -> usize {
        self.conversations
            .read()
            .expect("InMemoryConversationStore: lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(&self, id: &ConversationId) -> Result<Conversation, DomainError> {
        self.conversations
            .read()
            .expect("InMemoryConversationStore: lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ConversationNotFound, "conversation not found")
                    .with_detail("conversation_id", id.to_string())
            })
    }

    async fn apply_delta(
        &self,
        id: &ConversationId,
        expected_version: u64,
        delta: &ConversationDelta,
    ) -> Result<Conversation, DomainError> {
        let mut conversations = self
            .conversations
            .write()
            .expect("InMemoryConversationStore: lock poisoned");
        let conversation = conversations.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::ConversationNotFound, "conversation not found")
                .with_detail("conversation_id", id.to_string())
        })?;

        if conversation.version != expected_version {
            return Err(DomainError::conflict("conversation version changed")
                .with_detail("expected_version", expected_version.to_string())
                .with_detail("actual_version", conversation.version.to_string()));
        }

        conversation.apply(delta);
        conversation.version += 1;
        Ok(conversation.clone())
    }

    async fn insert(&self, conversation: Conversation) -> Result<(), DomainError> {
        let mut conversations = self
            .conversations
            .write()
            .expect("InMemoryConversationStore: lock poisoned");
        if conversations.contains_key(&conversation.id) {
            return Err(
                DomainError::new(ErrorCode::StorageError, "conversation already exists")
                    .with_detail("conversation_id", conversation.id.to_string()),
            );
        }
        conversations.insert(conversation.id, conversation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Patch;
    use crate::domain::foundation::Timestamp;

    fn conversation() -> Conversation {
        Conversation::new(ConversationId::new(), Timestamp::from_epoch_ms(1_000))
    }

    #[tokio::test]
    async fn get_unknown_conversation_fails() {
        let store = InMemoryConversationStore::new();
        let error = store.get(&ConversationId::new()).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::ConversationNotFound);
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = InMemoryConversationStore::new();
        let conversation = conversation();
        let id = conversation.id;

        store.insert(conversation.clone()).await.unwrap();
        let fetched = store.get(&id).await.unwrap();
        assert_eq!(fetched, conversation);
    }

    #[tokio::test]
    async fn double_insert_fails() {
        let store = InMemoryConversationStore::new();
        let conversation = conversation();

        store.insert(conversation.clone()).await.unwrap();
        let error = store.insert(conversation).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::StorageError);
    }

    #[tokio::test]
    async fn apply_delta_bumps_version() {
        let conversation = conversation();
        let id = conversation.id;
        let store = InMemoryConversationStore::seeded([conversation]);

        let delta = ConversationDelta {
            order: Patch::Set(42.0),
            ..Default::default()
        };
        let updated = store.apply_delta(&id, 0, &delta).await.unwrap();

        assert_eq!(updated.order, 42.0);
        assert_eq!(updated.version, 1);
    }

    #[tokio::test]
    async fn stale_version_is_a_retryable_conflict() {
        let conversation = conversation();
        let id = conversation.id;
        let store = InMemoryConversationStore::seeded([conversation]);

        let delta = ConversationDelta {
            order: Patch::Set(42.0),
            ..Default::default()
        };
        store.apply_delta(&id, 0, &delta).await.unwrap();
        let error = store.apply_delta(&id, 0, &delta).await.unwrap_err();

        assert!(error.is_retryable());
    }
}
