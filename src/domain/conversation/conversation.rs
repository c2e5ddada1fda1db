//! Conversation aggregate and its SLA metrics block.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConversationId, IdentityId, StateMachine, TeamId, Timestamp};

use super::activity::{ChannelKind, Identity, IdentityKind};
use super::delta::{ConversationDelta, Patch};

/// Conversation lifecycle state. Closed is terminal, though activities
/// may still be appended afterwards for audit purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Open,
    Closed,
}

impl StateMachine for ConversationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (ConversationState::Open, ConversationState::Closed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            ConversationState::Open => vec![ConversationState::Closed],
            ConversationState::Closed => vec![],
        }
    }
}

/// Service-level metrics for one conversation.
///
/// Instants are epoch ms, durations are ms. `assignment_at`,
/// `first_agent_reply_at`, and `time_to_assignment` are write-once; the
/// merge in [`Conversation::apply`] refuses to overwrite them.
///
/// The `median_*` fields are not true medians: they are a two-point
/// running average `(old + new) / 2` recomputed on every qualifying
/// activity. Downstream consumers expect exactly this approximation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlaMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_agent_reply_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_agent_reply_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_user_reply_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_agent_reply: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_time_to_agent_reply: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_user_reply: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_time_to_user_reply: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_assignment: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_close: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awaiting_working_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automatic_duration_attendance: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_at: Option<Timestamp>,
}

/// Long-lived aggregate tracking one customer interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub created_at: Timestamp,
    /// Positive priority weight; non-positive values are treated as 1 by
    /// the order calculator.
    pub priority: i64,
    /// Queue ranking key; lower serves sooner. Only meaningful relative
    /// to other conversations in the same queue.
    pub order: f64,
    /// When the conversation entered the awaiting-agent state; `None`
    /// means not waiting (persisted as 0 upstream).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting_since: Option<Timestamp>,
    pub metrics: SlaMetrics,
    /// Participants, unique by identity id.
    pub members: Vec<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_team_id: Option<TeamId>,
    /// Channel kind the conversation was created through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_channel: Option<ChannelKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended_until: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_by: Option<IdentityId>,
    pub state: ConversationState,
    /// Optimistic-concurrency version, bumped by the store on each merge.
    #[serde(default)]
    pub version: u64,
}

impl Conversation {
    /// Creates an open conversation with default priority.
    pub fn new(id: ConversationId, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            priority: 1,
            order: 0.0,
            waiting_since: None,
            metrics: SlaMetrics::default(),
            members: Vec::new(),
            assigned_to_team_id: None,
            origin_channel: None,
            suspended_until: None,
            closed_by: None,
            state: ConversationState::Open,
            version: 0,
        }
    }

    /// Builder-style helper: sets the priority weight.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Builder-style helper: sets the origin channel kind.
    pub fn with_origin(mut self, origin: ChannelKind) -> Self {
        self.origin_channel = Some(origin);
        self
    }

    /// Builder-style helper: adds a member (unique by id).
    pub fn with_member(mut self, member: Identity) -> Self {
        self.upsert_member(member);
        self
    }

    /// True if any enabled agent is a member.
    pub fn has_enabled_agent(&self) -> bool {
        self.members.iter().any(|m| m.is_active(IdentityKind::Agent))
    }

    /// True if any enabled bot is a member.
    pub fn has_enabled_bot(&self) -> bool {
        self.members.iter().any(|m| m.is_active(IdentityKind::Bot))
    }

    /// True if any enabled agent other than `excluded` is a member.
    ///
    /// Used on member_exit to decide whether the conversation loses its
    /// last active agent.
    pub fn has_enabled_agent_besides(&self, excluded: &IdentityId) -> bool {
        self.members
            .iter()
            .any(|m| m.id != *excluded && m.is_active(IdentityKind::Agent))
    }

    fn upsert_member(&mut self, member: Identity) {
        match self.members.iter_mut().find(|m| m.id == member.id) {
            Some(existing) => *existing = member,
            None => self.members.push(member),
        }
    }

    /// Merges a delta into this snapshot.
    ///
    /// Write-once metrics (`assignment_at`, `first_agent_reply_at`,
    /// `time_to_assignment`) are kept if already set, whatever the delta
    /// says; the engine also guards these, so a drop here indicates an
    /// out-of-order activity pair and is logged by the caller's tracing
    /// span, not here.
    pub fn apply(&mut self, delta: &ConversationDelta) {
        if let Patch::Set(order) = delta.order {
            self.order = order;
        }
        if let Patch::Set(waiting_since) = delta.waiting_since {
            self.waiting_since = waiting_since;
        }
        if let Patch::Set(state) = delta.state {
            self.state = state;
        }
        if let Patch::Set(ref closed_by) = delta.closed_by {
            self.closed_by = closed_by.clone();
        }
        if let Patch::Set(suspended_until) = delta.suspended_until {
            self.suspended_until = suspended_until;
        }
        if let Patch::Set(team_id) = delta.assigned_to_team_id {
            self.assigned_to_team_id = team_id;
        }
        if let Some(ref member) = delta.member_added {
            self.upsert_member(member.clone());
        }
        if let Some(ref member_id) = delta.member_removed {
            self.members.retain(|m| m.id != *member_id);
        }

        let m = &mut self.metrics;
        let d = &delta.metrics;
        if let Patch::Set(v) = d.assignment_at {
            m.assignment_at.get_or_insert(v);
        }
        if let Patch::Set(v) = d.first_agent_reply_at {
            m.first_agent_reply_at.get_or_insert(v);
        }
        if let Patch::Set(v) = d.time_to_assignment {
            m.time_to_assignment.get_or_insert(v);
        }
        if let Patch::Set(v) = d.last_agent_reply_at {
            m.last_agent_reply_at = Some(v);
        }
        if let Patch::Set(v) = d.last_user_reply_at {
            m.last_user_reply_at = Some(v);
        }
        if let Patch::Set(v) = d.time_to_agent_reply {
            m.time_to_agent_reply = Some(v);
        }
        if let Patch::Set(v) = d.median_time_to_agent_reply {
            m.median_time_to_agent_reply = Some(v);
        }
        if let Patch::Set(v) = d.time_to_user_reply {
            m.time_to_user_reply = Some(v);
        }
        if let Patch::Set(v) = d.median_time_to_user_reply {
            m.median_time_to_user_reply = Some(v);
        }
        if let Patch::Set(v) = d.time_to_close {
            m.time_to_close = Some(v);
        }
        if let Patch::Set(v) = d.awaiting_working_time {
            m.awaiting_working_time = Some(v);
        }
        if let Patch::Set(v) = d.automatic_duration_attendance {
            m.automatic_duration_attendance = Some(v);
        }
        if let Patch::Set(v) = d.close_at {
            m.close_at = Some(v);
        }
    }
}
