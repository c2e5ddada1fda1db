//! Activity metrics engine.
//!
//! A state machine keyed by `(activity kind, sender kind)`. It reads one
//! conversation snapshot, never mutates it, and emits a delta plus the
//! notifications the merge should trigger. Pure function of its inputs:
//! the same activity against the same snapshot yields the same output,
//! which is what lets the coordinator retry on merge conflicts.

use tracing::warn;

use crate::domain::foundation::Timestamp;
use crate::domain::queueing::{compute_order, QueueingPolicy};
use crate::domain::scheduling::{working_time_between, Team};

use super::activity::{Activity, ActivityKind, ChannelKind, IdentityKind};
use super::conversation::{Conversation, ConversationState};
use super::delta::{ConversationDelta, NotifyIntent, Patch};

/// What one activity does to a conversation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineOutput {
    pub delta: ConversationDelta,
    pub intents: Vec<NotifyIntent>,
}

/// Computes conversation deltas from incoming activities.
///
/// Construct once with the queueing policy and share; the engine holds
/// no per-conversation state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityMetricsEngine {
    policy: QueueingPolicy,
}

impl ActivityMetricsEngine {
    pub fn new(policy: QueueingPolicy) -> Self {
        Self { policy }
    }

    /// Processes one activity against a conversation snapshot.
    ///
    /// `team` is only consulted for the business-hours metric; passing
    /// `None` skips it. Unknown `(kind, sender)` combinations produce an
    /// empty delta and no intents.
    pub fn process(
        &self,
        activity: &Activity,
        conversation: &Conversation,
        team: Option<&Team>,
    ) -> EngineOutput {
        let now = activity.timestamp.unwrap_or_else(Timestamp::now);

        let mut delta = ConversationDelta::default();
        let mut intents = Vec::new();

        // Any activity other than a suspension lifts an active suspension.
        if activity.kind != ActivityKind::SuspendConversation {
            if let Some(until) = conversation.suspended_until {
                if until.is_after(&now) {
                    delta.suspended_until = Patch::Set(None);
                }
            }
        }

        match (activity.kind, activity.from.kind) {
            (
                ActivityKind::Message | ActivityKind::MemberUploadAttachment,
                IdentityKind::Agent,
            ) => self.on_agent_reply(now, conversation, team, &mut delta),
            (
                ActivityKind::Message | ActivityKind::MemberUploadAttachment,
                IdentityKind::User,
            ) => self.on_user_message(now, conversation, &mut delta),
            (ActivityKind::MemberAdded, _) => {
                self.on_member_added(now, activity, conversation, &mut delta)
            }
            (ActivityKind::AssignedToTeam, _) => {
                self.on_assigned_to_team(now, activity, conversation, &mut delta)
            }
            (ActivityKind::MemberExit, _) => {
                self.on_member_exit(activity, conversation, &mut delta)
            }
            (ActivityKind::EndConversation, _) => {
                self.on_end_conversation(now, activity, conversation, &mut delta);
                intents.push(NotifyIntent::ConversationClosed);
            }
            (ActivityKind::SuspendConversation, _) => {
                if let Some(until) = activity.suspended_until {
                    delta.suspended_until = Patch::Set(Some(until));
                    intents.push(NotifyIntent::ConversationSuspended);
                }
            }
            _ => {}
        }

        if !delta.is_empty() {
            intents.insert(0, NotifyIntent::MetricsUpdated);
        }

        EngineOutput { delta, intents }
    }

    fn on_agent_reply(
        &self,
        now: Timestamp,
        conversation: &Conversation,
        team: Option<&Team>,
        delta: &mut ConversationDelta,
    ) {
        let metrics = &conversation.metrics;

        if metrics.first_agent_reply_at.is_none() {
            delta.metrics.first_agent_reply_at = Patch::Set(now);
        }

        if let Some(waiting_since) = conversation.waiting_since {
            let elapsed = now.millis_since(waiting_since);
            if metrics.time_to_agent_reply.is_none() {
                delta.metrics.time_to_agent_reply = Patch::Set(elapsed);
            }
            delta.metrics.median_time_to_agent_reply =
                Patch::Set(running_average(metrics.median_time_to_agent_reply, elapsed));

            if let (Some(assignment_at), Some(team)) = (metrics.assignment_at, team) {
                match working_time_between(assignment_at, now, &team.attendance, &team.off_days)
                {
                    Ok(working) => {
                        delta.metrics.awaiting_working_time = Patch::Set(working);
                    }
                    Err(error) => {
                        // A bad team record degrades this one metric, not
                        // the whole transition.
                        warn!(
                            conversation_id = %conversation.id,
                            team_id = %team.id,
                            %error,
                            "skipping awaiting_working_time, team schedule is malformed"
                        );
                    }
                }
            }

            delta.waiting_since = Patch::Set(None);
        }

        delta.order = Patch::Set(compute_order(
            conversation.priority,
            self.policy.low_priority_baseline,
            now,
        ));
        delta.metrics.last_agent_reply_at = Patch::Set(now);
    }

    fn on_user_message(
        &self,
        now: Timestamp,
        conversation: &Conversation,
        delta: &mut ConversationDelta,
    ) {
        // While an enabled bot drives the conversation the user is not
        // waiting on a human, so the whole branch is gated off.
        if conversation.has_enabled_bot() {
            return;
        }

        let metrics = &conversation.metrics;

        if let Some(last_agent_reply_at) = metrics.last_agent_reply_at {
            if metrics.time_to_user_reply.is_none() {
                delta.metrics.time_to_user_reply =
                    Patch::Set(now.millis_since(last_agent_reply_at));
            }
        }

        if conversation.waiting_since.is_none() {
            delta.waiting_since = Patch::Set(Some(now));

            if let Some(last_agent_reply_at) = metrics.last_agent_reply_at {
                let elapsed = now.millis_since(last_agent_reply_at);
                delta.metrics.median_time_to_user_reply =
                    Patch::Set(running_average(metrics.median_time_to_user_reply, elapsed));
            }

            let baseline = if conversation.has_enabled_agent() {
                self.policy.high_priority_baseline
            } else {
                self.policy.low_priority_baseline
            };
            let anchor = metrics.assignment_at.unwrap_or(now);
            delta.order = Patch::Set(compute_order(conversation.priority, baseline, anchor));
        }

        delta.metrics.last_user_reply_at = Patch::Set(now);
    }

    fn on_member_added(
        &self,
        now: Timestamp,
        activity: &Activity,
        conversation: &Conversation,
        delta: &mut ConversationDelta,
    ) {
        // Every joining member lands in the member set, whatever its
        // kind; only agents and live-agent channels move metrics.
        delta.member_added = Some(activity.from.clone());
        match activity.from.kind {
            IdentityKind::Agent => self.on_agent_added(now, conversation, delta),
            IdentityKind::Channel => self.on_channel_added(now, activity, conversation, delta),
            _ => {}
        }
    }

    fn on_agent_added(
        &self,
        now: Timestamp,
        conversation: &Conversation,
        delta: &mut ConversationDelta,
    ) {
        let metrics = &conversation.metrics;
        if metrics.assignment_at.is_none() {
            delta.metrics.assignment_at = Patch::Set(now);
            delta.metrics.time_to_assignment = Patch::Set(0);
            delta.waiting_since = Patch::Set(None);
            delta.order = Patch::Set(compute_order(
                conversation.priority,
                self.policy.low_priority_baseline,
                now,
            ));
        } else if let Some(waiting_since) = conversation.waiting_since {
            if metrics.time_to_assignment.is_none() {
                delta.metrics.time_to_assignment = Patch::Set(now.millis_since(waiting_since));
            }
        }
    }

    fn on_channel_added(
        &self,
        now: Timestamp,
        activity: &Activity,
        conversation: &Conversation,
        delta: &mut ConversationDelta,
    ) {
        if activity.from.channel != Some(ChannelKind::LiveAgent) {
            return;
        }

        if conversation.metrics.assignment_at.is_none() {
            delta.metrics.assignment_at = Patch::Set(now);
        }
        delta.waiting_since = Patch::Set(Some(now));
        delta.order = Patch::Set(compute_order(
            conversation.priority,
            self.policy.low_priority_baseline,
            now,
        ));
    }

    fn on_assigned_to_team(
        &self,
        now: Timestamp,
        activity: &Activity,
        conversation: &Conversation,
        delta: &mut ConversationDelta,
    ) {
        let Some(team_id) = activity.team_id else {
            return;
        };

        if conversation.assigned_to_team_id != Some(team_id) {
            delta.assigned_to_team_id = Patch::Set(Some(team_id));
        }

        if conversation.metrics.assignment_at.is_none() {
            delta.metrics.assignment_at = Patch::Set(now);

            // Campaign conversations start outbound; nobody is waiting
            // on an agent yet.
            if conversation.origin_channel == Some(ChannelKind::Campaign) {
                delta.waiting_since = Patch::Set(None);
            } else {
                delta.waiting_since = Patch::Set(Some(now));
            }

            if conversation.metrics.automatic_duration_attendance.is_none() {
                delta.metrics.automatic_duration_attendance =
                    Patch::Set(now.millis_since(conversation.created_at));
            }

            delta.order = Patch::Set(compute_order(
                conversation.priority,
                self.policy.low_priority_baseline,
                now,
            ));
        }
    }

    fn on_member_exit(
        &self,
        activity: &Activity,
        conversation: &Conversation,
        delta: &mut ConversationDelta,
    ) {
        delta.member_removed = Some(activity.from.id.clone());

        if conversation.has_enabled_agent_besides(&activity.from.id) {
            return;
        }
        if let Some(assignment_at) = conversation.metrics.assignment_at {
            delta.order = Patch::Set(compute_order(
                conversation.priority,
                self.policy.low_priority_baseline,
                assignment_at,
            ));
        }
    }

    fn on_end_conversation(
        &self,
        now: Timestamp,
        activity: &Activity,
        conversation: &Conversation,
        delta: &mut ConversationDelta,
    ) {
        let metrics = &conversation.metrics;

        if let Some(assignment_at) = metrics.assignment_at {
            if metrics.time_to_close.is_none() {
                delta.metrics.time_to_close = Patch::Set(now.millis_since(assignment_at));
            }
        }

        if conversation.waiting_since.is_some() {
            delta.waiting_since = Patch::Set(None);
        }
        if conversation.suspended_until.is_some() {
            delta.suspended_until = Patch::Set(None);
        }

        delta.state = Patch::Set(ConversationState::Closed);
        delta.closed_by = Patch::Set(Some(activity.from.id.clone()));
        delta.metrics.close_at = Patch::Set(now);

        if activity.from.kind == IdentityKind::Bot
            && metrics.automatic_duration_attendance.is_none()
        {
            delta.metrics.automatic_duration_attendance =
                Patch::Set(now.millis_since(conversation.created_at));
        }

        delta.order = Patch::Set(compute_order(
            conversation.priority,
            self.policy.low_priority_baseline,
            now,
        ));
    }
}

/// Two-point running average, `(old + new) / 2`.
///
/// Not a true median; downstream consumers expect exactly this
/// approximation, so it must not be replaced with one.
fn running_average(old: Option<i64>, new: i64) -> i64 {
    match old {
        Some(old) => (old + new) / 2,
        None => new,
    }
}
