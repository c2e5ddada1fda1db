//! ConversationUpdateCoordinator - serialized read-compute-merge cycles.
//!
//! Activities for one conversation may arrive concurrently from several
//! channel adapters. The engine itself is pure, so correctness hinges on
//! each activity seeing a snapshot that already reflects the previous
//! delta. The coordinator enforces that with a per-conversation async
//! mutex held across the whole read-compute-merge cycle, plus a bounded
//! retry loop around the versioned merge for anything that slips past
//! (another process writing to the same store, for instance).

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};

use crate::domain::conversation::{
    Activity, ActivityMetricsEngine, Conversation, ConversationState, NotifyIntent,
};
use crate::domain::foundation::{ConversationId, DomainError, EventEnvelope, Timestamp};
use crate::domain::scheduling::Team;
use crate::ports::{ConversationStore, NotificationPublisher, TeamDirectory};

/// Default bound on merge retries after a version conflict.
pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;

/// Result of one processed activity.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    /// Post-merge snapshot (unchanged when the delta was empty).
    pub conversation: Conversation,
    /// Notifications the activity triggered (already dispatched,
    /// best-effort).
    pub intents: Vec<NotifyIntent>,
}

/// Orchestrates activity processing against the conversation store.
pub struct ConversationUpdateCoordinator {
    engine: ActivityMetricsEngine,
    store: Arc<dyn ConversationStore>,
    teams: Arc<dyn TeamDirectory>,
    publisher: Arc<dyn NotificationPublisher>,
    max_conflict_retries: u32,
    locks: StdMutex<HashMap<ConversationId, Arc<AsyncMutex<()>>>>,
}

impl ConversationUpdateCoordinator {
    pub fn new(
        engine: ActivityMetricsEngine,
        store: Arc<dyn ConversationStore>,
        teams: Arc<dyn TeamDirectory>,
        publisher: Arc<dyn NotificationPublisher>,
    ) -> Self {
        Self {
            engine,
            store,
            teams,
            publisher,
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Overrides the merge-conflict retry bound.
    pub fn with_max_conflict_retries(mut self, retries: u32) -> Self {
        self.max_conflict_retries = retries;
        self
    }

    /// Processes one activity for a conversation.
    ///
    /// Stamps a missing activity timestamp on ingest so the engine stays
    /// a pure function of its inputs. Holds the conversation's lock for
    /// the whole read-compute-merge cycle; notification dispatch happens
    /// inside the lock as well so envelopes leave in merge order.
    pub async fn handle_activity(
        &self,
        conversation_id: &ConversationId,
        mut activity: Activity,
    ) -> Result<UpdateOutcome, DomainError> {
        if activity.timestamp.is_none() {
            activity.timestamp = Some(Timestamp::now());
        }

        let lock = self.lock_for(conversation_id);
        let _guard = lock.lock().await;

        let mut attempt = 0u32;
        loop {
            let snapshot = self.store.get(conversation_id).await?;
            let team = self.team_for(&snapshot).await;

            let output = self.engine.process(&activity, &snapshot, team.as_ref());
            if output.delta.is_empty() {
                debug!(%conversation_id, activity_kind = ?activity.kind, "activity produced no delta");
                return Ok(UpdateOutcome {
                    conversation: snapshot,
                    intents: Vec::new(),
                });
            }

            match self
                .store
                .apply_delta(conversation_id, snapshot.version, &output.delta)
                .await
            {
                Ok(updated) => {
                    let occurred_at = activity.timestamp.unwrap_or_else(Timestamp::now);
                    self.dispatch(&updated, &output.intents, occurred_at).await;
                    if updated.state == ConversationState::Closed {
                        self.release_lock(conversation_id);
                    }
                    return Ok(UpdateOutcome {
                        conversation: updated,
                        intents: output.intents,
                    });
                }
                Err(error) if error.is_retryable() && attempt < self.max_conflict_retries => {
                    attempt += 1;
                    debug!(%conversation_id, attempt, "merge conflict, re-reading snapshot");
                }
                Err(error) => return Err(error),
            }
        }
    }

    fn lock_for(&self, conversation_id: &ConversationId) -> Arc<AsyncMutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(*conversation_id).or_default().clone()
    }

    /// Drops a closed conversation's lock entry so the registry does not
    /// grow without bound.
    ///
    /// A straggler activity that still holds the old mutex races a fresh
    /// one at most once; the versioned merge rejects whichever delta
    /// computed from the staler snapshot.
    fn release_lock(&self, conversation_id: &ConversationId) {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.remove(conversation_id);
    }

    /// Looks up the assigned team, degrading to `None` on any failure.
    ///
    /// A missing or unreadable team record costs one business-hours
    /// metric; it must never block the update.
    async fn team_for(&self, conversation: &Conversation) -> Option<Team> {
        let team_id = conversation.assigned_to_team_id?;
        match self.teams.get(&team_id).await {
            Ok(team) => team,
            Err(error) => {
                warn!(
                    conversation_id = %conversation.id,
                    %team_id,
                    %error,
                    "team lookup failed, skipping business-hours metrics"
                );
                None
            }
        }
    }

    /// Publishes notification envelopes, logging and dropping failures.
    ///
    /// Envelopes carry the activity time, not the publish time, so
    /// downstream consumers can order them against the activity stream.
    async fn dispatch(
        &self,
        conversation: &Conversation,
        intents: &[NotifyIntent],
        occurred_at: Timestamp,
    ) {
        if intents.is_empty() {
            return;
        }
        let payload = match serde_json::to_value(conversation) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(conversation_id = %conversation.id, %error, "conversation projection failed to serialize");
                return;
            }
        };
        for intent in intents {
            let envelope = EventEnvelope::new(
                intent.event_type(),
                conversation.id.to_string(),
                "conversation",
                payload.clone(),
            )
            .occurred_at(occurred_at);
            if let Err(error) = self.publisher.publish(&envelope).await {
                warn!(
                    conversation_id = %conversation.id,
                    event_type = intent.event_type(),
                    %error,
                    "notification dropped"
                );
            }
        }
    }
}
