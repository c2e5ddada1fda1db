//! Activity value objects - one message/event within a conversation.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{ActivityId, IdentityId, TeamId, Timestamp};

/// What kind of event an activity represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Message,
    MemberAdded,
    MemberExit,
    AssignedToTeam,
    EndConversation,
    MemberUploadAttachment,
    SuspendConversation,
}

/// What kind of participant an identity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityKind {
    User,
    Agent,
    Bot,
    Channel,
    System,
}

/// Which kind of channel an identity (or conversation) came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// A human-staffed channel that places conversations in an agent queue.
    LiveAgent,
    /// Outbound campaign channel; its conversations start without anyone waiting.
    Campaign,
    /// Ordinary inbound messaging channel (WhatsApp, Telegram, webchat, ...).
    Messaging,
}

/// A conversation participant reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub kind: IdentityKind,
    /// Set when the identity represents (or arrived through) a channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelKind>,
    /// Disabled members stay in the member list but no longer count as
    /// active participants for queueing decisions.
    #[serde(default)]
    pub disabled: bool,
}

impl Identity {
    /// Creates an end-user identity.
    pub fn user(id: IdentityId) -> Self {
        Self {
            id,
            kind: IdentityKind::User,
            channel: None,
            disabled: false,
        }
    }

    /// Creates an agent identity.
    pub fn agent(id: IdentityId) -> Self {
        Self {
            id,
            kind: IdentityKind::Agent,
            channel: None,
            disabled: false,
        }
    }

    /// Creates a bot identity.
    pub fn bot(id: IdentityId) -> Self {
        Self {
            id,
            kind: IdentityKind::Bot,
            channel: None,
            disabled: false,
        }
    }

    /// Creates a channel identity of the given kind.
    pub fn channel(id: IdentityId, kind: ChannelKind) -> Self {
        Self {
            id,
            kind: IdentityKind::Channel,
            channel: Some(kind),
            disabled: false,
        }
    }

    /// Creates a system identity.
    pub fn system(id: IdentityId) -> Self {
        Self {
            id,
            kind: IdentityKind::System,
            channel: None,
            disabled: false,
        }
    }

    /// Returns a disabled copy of this identity.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// True for enabled identities of the given kind.
    pub fn is_active(&self, kind: IdentityKind) -> bool {
        self.kind == kind && !self.disabled
    }
}

/// One event within a conversation. Immutable once dispatched.
///
/// `timestamp` is optional on the wire; the update coordinator stamps
/// missing timestamps on ingest so the metrics engine stays deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub kind: ActivityKind,
    /// Who produced the activity. For member_added/member_exit this is
    /// the member joining or leaving.
    pub from: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Target team for assigned_to_team activities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    /// Suspension horizon for suspend_conversation activities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended_until: Option<Timestamp>,
    /// Channel-specific payload, opaque to the metrics engine.
    #[serde(default)]
    pub data: JsonValue,
}

impl Activity {
    /// Creates an activity of the given kind from a participant.
    pub fn new(kind: ActivityKind, from: Identity) -> Self {
        Self {
            id: ActivityId::new(),
            kind,
            from,
            timestamp: None,
            team_id: None,
            suspended_until: None,
            data: JsonValue::Null,
        }
    }

    /// Creates a message activity.
    pub fn message(from: Identity) -> Self {
        Self::new(ActivityKind::Message, from)
    }

    /// Creates a member_added activity for the joining member.
    pub fn member_added(member: Identity) -> Self {
        Self::new(ActivityKind::MemberAdded, member)
    }

    /// Creates a member_exit activity for the leaving member.
    pub fn member_exit(member: Identity) -> Self {
        Self::new(ActivityKind::MemberExit, member)
    }

    /// Creates an assigned_to_team activity.
    pub fn assigned_to_team(from: Identity, team_id: TeamId) -> Self {
        let mut activity = Self::new(ActivityKind::AssignedToTeam, from);
        activity.team_id = Some(team_id);
        activity
    }

    /// Creates an end_conversation activity.
    pub fn end_conversation(from: Identity) -> Self {
        Self::new(ActivityKind::EndConversation, from)
    }

    /// Creates a suspend_conversation activity.
    pub fn suspend_conversation(from: Identity, until: Timestamp) -> Self {
        let mut activity = Self::new(ActivityKind::SuspendConversation, from);
        activity.suspended_until = Some(until);
        activity
    }

    /// Sets the activity timestamp.
    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attaches an opaque payload.
    pub fn with_data(mut self, data: JsonValue) -> Self {
        self.data = data;
        self
    }
}
