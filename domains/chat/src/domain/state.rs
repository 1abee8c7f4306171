//! State machine for bot/human handoff
//!
//! Handoff states: Bot ↔ Human. Every transition is total: no event is ever
//! rejected because of the current state, and repeating an event is safe.

use chrono::{DateTime, Utc};

use crate::domain::entities::{Conversation, HandoffStatus};

/// Events that drive handoff transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandoffEvent {
    /// An admin explicitly takes the conversation over
    TakeOver { admin: String },
    /// Control goes back to the bot
    Release,
    /// An admin replied; implies a takeover if the bot still has control
    AdminReply { admin: String },
}

impl std::fmt::Display for HandoffEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TakeOver { .. } => write!(f, "take_over"),
            Self::Release => write!(f, "release"),
            Self::AdminReply { .. } => write!(f, "admin_reply"),
        }
    }
}

/// Handoff state machine
pub struct HandoffStateMachine;

impl HandoffStateMachine {
    /// Next state for an event. Never fails.
    pub fn transition(_current: HandoffStatus, event: &HandoffEvent) -> HandoffStatus {
        match event {
            HandoffEvent::TakeOver { .. } | HandoffEvent::AdminReply { .. } => HandoffStatus::Human,
            HandoffEvent::Release => HandoffStatus::Bot,
        }
    }

    /// Apply an event to a conversation, updating handoff metadata.
    ///
    /// - `TakeOver` always credits the admin and refreshes `handoff_at`.
    /// - `AdminReply` credits the admin only when taking control from the bot.
    /// - `Release` clears `handoff_by` and `handoff_at`.
    ///
    /// `updated_at` advances in every case.
    pub fn apply(conversation: &mut Conversation, event: &HandoffEvent, now: DateTime<Utc>) {
        let current = conversation.handoff_status;
        let next = Self::transition(current, event);

        match event {
            HandoffEvent::TakeOver { admin } => {
                conversation.handoff_by = Some(admin.clone());
                conversation.handoff_at = Some(now);
            }
            HandoffEvent::AdminReply { admin } if current == HandoffStatus::Bot => {
                conversation.handoff_by = Some(admin.clone());
                conversation.handoff_at = Some(now);
            }
            HandoffEvent::AdminReply { .. } => {}
            HandoffEvent::Release => {
                conversation.handoff_by = None;
                conversation.handoff_at = None;
            }
        }

        if next != current {
            tracing::debug!(
                conversation_id = %conversation.id,
                from = %current,
                to = %next,
                event = %event,
                "Handoff transition"
            );
        }

        conversation.handoff_status = next;
        conversation.touch(now);
    }
}
