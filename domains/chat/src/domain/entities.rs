//! Domain entities for the live-chat handoff
//!
//! A conversation is created lazily the first time its id is referenced and
//! owns an append-only, insertion-ordered sequence of messages.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::ChatError;

/// Identity credited when an admin does not say who they are
pub const DEFAULT_ADMIN: &str = "admin";

/// Conversation lifecycle flag (informational only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    #[default]
    Open,
    Closed,
}

impl std::fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationStatus::Open => write!(f, "open"),
            ConversationStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Who is in control of the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HandoffStatus {
    #[default]
    Bot,
    Human,
}

impl std::fmt::Display for HandoffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandoffStatus::Bot => write!(f, "bot"),
            HandoffStatus::Human => write!(f, "human"),
        }
    }
}

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Admin,
    Bot,
    System,
}

impl Sender {
    pub const ALL: [Sender; 4] = [Sender::User, Sender::Admin, Sender::Bot, Sender::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Admin => "admin",
            Sender::Bot => "bot",
            Sender::System => "system",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sender {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sender::ALL
            .into_iter()
            .find(|sender| sender.as_str() == s)
            .ok_or_else(|| ChatError::InvalidSender(s.to_string()))
    }
}

/// Conversation entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub status: ConversationStatus,
    pub handoff_status: HandoffStatus,
    pub handoff_at: Option<DateTime<Utc>>,
    pub handoff_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a conversation in its default state: open, bot in control
    pub fn new(id: &str, now: DateTime<Utc>) -> Result<Self, ChatError> {
        validate_id(id)?;

        Ok(Conversation {
            id: id.to_string(),
            status: ConversationStatus::default(),
            handoff_status: HandoffStatus::default(),
            handoff_at: None,
            handoff_by: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Record a mutation. `updated_at` never moves backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    pub fn is_human_controlled(&self) -> bool {
        self.handoff_status == HandoffStatus::Human
    }
}

/// Reject blank conversation identifiers
pub fn validate_id(id: &str) -> Result<(), ChatError> {
    if id.trim().is_empty() {
        return Err(ChatError::MissingIdentifier);
    }
    Ok(())
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: String,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(conversation_id: &str, sender: Sender, content: &str, now: DateTime<Utc>) -> Self {
        Message {
            id: Uuid::new_v4(),
            conversation_id: conversation_id.to_string(),
            sender,
            content: content.to_string(),
            timestamp: now,
        }
    }
}

/// Conversation plus message statistics, for the admin chat list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationSummary {
    #[serde(flatten)]
    pub conversation: Conversation,
    #[serde(rename = "messageCount")]
    pub message_count: usize,
    #[serde(rename = "lastMessage")]
    pub last_message: Option<Message>,
}
