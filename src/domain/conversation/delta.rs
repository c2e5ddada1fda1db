//! Snapshot-in, delta-out contract for conversation updates.
//!
//! The metrics engine never mutates the conversation it reads; it emits a
//! `ConversationDelta` describing the fields to change, and the update
//! coordinator merges it atomically. A `Patch` that was already applied
//! merges to the same result, so an at-least-once redelivery guarded by
//! activity dedup cannot double-apply a running-average update.

use crate::domain::foundation::{IdentityId, TeamId, Timestamp};

use super::activity::Identity;
use super::conversation::ConversationState;

/// A single optional field change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Leave the field as it is.
    #[default]
    Keep,
    /// Overwrite the field with this value.
    Set(T),
}

impl<T> Patch<T> {
    /// Returns true if the patch changes the field.
    pub fn is_set(&self) -> bool {
        matches!(self, Patch::Set(_))
    }

    /// Returns the value to set, if any.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(v) => Some(v),
            Patch::Keep => None,
        }
    }
}

/// Delta for the SLA metrics block.
///
/// Durations are milliseconds; instants are [`Timestamp`]s. The merge
/// (not this struct) enforces the write-once fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricsDelta {
    pub assignment_at: Patch<Timestamp>,
    pub first_agent_reply_at: Patch<Timestamp>,
    pub last_agent_reply_at: Patch<Timestamp>,
    pub last_user_reply_at: Patch<Timestamp>,
    pub time_to_agent_reply: Patch<i64>,
    pub median_time_to_agent_reply: Patch<i64>,
    pub time_to_user_reply: Patch<i64>,
    pub median_time_to_user_reply: Patch<i64>,
    pub time_to_assignment: Patch<i64>,
    pub time_to_close: Patch<i64>,
    pub awaiting_working_time: Patch<i64>,
    pub automatic_duration_attendance: Patch<i64>,
    pub close_at: Patch<Timestamp>,
}

impl MetricsDelta {
    /// Returns true if no metrics field is patched.
    pub fn is_empty(&self) -> bool {
        !(self.assignment_at.is_set()
            || self.first_agent_reply_at.is_set()
            || self.last_agent_reply_at.is_set()
            || self.last_user_reply_at.is_set()
            || self.time_to_agent_reply.is_set()
            || self.median_time_to_agent_reply.is_set()
            || self.time_to_user_reply.is_set()
            || self.median_time_to_user_reply.is_set()
            || self.time_to_assignment.is_set()
            || self.time_to_close.is_set()
            || self.awaiting_working_time.is_set()
            || self.automatic_duration_attendance.is_set()
            || self.close_at.is_set())
    }
}

/// Partial update to a conversation, merged atomically by the coordinator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversationDelta {
    /// New queue ranking key.
    pub order: Patch<f64>,
    /// `Some(ts)` enters the awaiting-agent state; `None` leaves it.
    pub waiting_since: Patch<Option<Timestamp>>,
    pub state: Patch<ConversationState>,
    pub closed_by: Patch<Option<IdentityId>>,
    pub suspended_until: Patch<Option<Timestamp>>,
    pub assigned_to_team_id: Patch<Option<TeamId>>,
    /// Member joining (unique by id; replaces a stale entry).
    pub member_added: Option<Identity>,
    /// Member leaving.
    pub member_removed: Option<IdentityId>,
    pub metrics: MetricsDelta,
}

impl ConversationDelta {
    /// Returns true if the delta changes nothing.
    pub fn is_empty(&self) -> bool {
        !(self.order.is_set()
            || self.waiting_since.is_set()
            || self.state.is_set()
            || self.closed_by.is_set()
            || self.suspended_until.is_set()
            || self.assigned_to_team_id.is_set()
            || self.member_added.is_some()
            || self.member_removed.is_some())
            && self.metrics.is_empty()
    }
}

/// Abstract notification request emitted alongside a delta.
///
/// The coordinator attaches the post-merge conversation projection and
/// forwards these to whatever pub/sub mechanism the deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyIntent {
    MetricsUpdated,
    ConversationClosed,
    ConversationSuspended,
}

impl NotifyIntent {
    /// Routing key for the notification envelope.
    pub fn event_type(&self) -> &'static str {
        match self {
            NotifyIntent::MetricsUpdated => "conversation.metrics_updated",
            NotifyIntent::ConversationClosed => "conversation.closed",
            NotifyIntent::ConversationSuspended => "conversation.suspended",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_defaults_to_keep() {
        let patch: Patch<i64> = Patch::default();
        assert!(!patch.is_set());
        assert_eq!(patch.as_set(), None);
    }

    #[test]
    fn patch_set_exposes_value() {
        let patch = Patch::Set(42i64);
        assert!(patch.is_set());
        assert_eq!(patch.as_set(), Some(&42));
    }

    #[test]
    fn default_delta_is_empty() {
        assert!(ConversationDelta::default().is_empty());
        assert!(MetricsDelta::default().is_empty());
    }

    #[test]
    fn delta_with_order_is_not_empty() {
        let delta = ConversationDelta {
            order: Patch::Set(10.0),
            ..Default::default()
        };
        assert!(!delta.is_empty());
    }

    #[test]
    fn delta_with_only_metrics_is_not_empty() {
        let delta = ConversationDelta {
            metrics: MetricsDelta {
                last_agent_reply_at: Patch::Set(Timestamp::from_epoch_ms(1)),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!delta.is_empty());
    }

    #[test]
    fn delta_with_member_change_is_not_empty() {
        let delta = ConversationDelta {
            member_removed: Some(IdentityId::new("a1").unwrap()),
            ..Default::default()
        };
        assert!(!delta.is_empty());
    }

    #[test]
    fn notify_intent_event_types_are_stable() {
        assert_eq!(
            NotifyIntent::MetricsUpdated.event_type(),
            "conversation.metrics_updated"
        );
        assert_eq!(
            NotifyIntent::ConversationClosed.event_type(),
            "conversation.closed"
        );
        assert_eq!(
            NotifyIntent::ConversationSuspended.event_type(),
            "conversation.suspended"
        );
    }
}
