//! Conversation storage for the Chat domain

pub mod memory;
pub mod retention;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{Conversation, ConversationSummary, Message, Sender};
use crate::domain::error::ChatError;
use crate::domain::state::HandoffEvent;

pub use memory::InMemoryConversationStore;
pub use retention::{spawn_retention_sweeper, RetentionPolicy};

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, ChatError>;

/// Outcome of an append, read back in the same critical section
#[derive(Debug, Clone, PartialEq)]
pub struct Appended {
    pub conversation: Conversation,
    pub message: Message,
    /// Messages from this sender in the conversation, including this one
    pub sender_count: usize,
}

impl Appended {
    /// The sender had never written to this conversation before
    pub fn is_first_from_sender(&self) -> bool {
        self.sender_count == 1
    }
}

/// Keyed store of conversations and their message logs.
///
/// Every mutation is atomic: a caller never observes a partially applied
/// append or transition.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Return the conversation, creating it in its default state if absent
    async fn get_or_create(&self, id: &str) -> StoreResult<Conversation>;

    /// Return the conversation without creating it
    async fn get(&self, id: &str) -> StoreResult<Option<Conversation>>;

    /// Ordered message history. Empty for an unknown conversation, which is
    /// not created.
    async fn get_messages(&self, id: &str) -> StoreResult<Vec<Message>>;

    /// Append a message, creating the conversation if needed.
    ///
    /// An `admin` message on a bot-controlled conversation hands it to a
    /// human first, credited to the generic admin identity.
    async fn append_message(
        &self,
        id: &str,
        sender: Sender,
        content: &str,
    ) -> StoreResult<Appended>;

    /// Apply a handoff event, creating the conversation if needed
    async fn apply_event(&self, id: &str, event: &HandoffEvent) -> StoreResult<Conversation>;

    /// Apply a handoff event and append a system `notice`, as one atomic
    /// step. Returns the conversation as left by both.
    async fn apply_event_with_notice(
        &self,
        id: &str,
        event: &HandoffEvent,
        notice: &str,
    ) -> StoreResult<(Conversation, Message)>;

    /// Take over if the bot has control, then append the admin's message,
    /// as one atomic step
    async fn reply_as_admin(
        &self,
        id: &str,
        admin: &str,
        content: &str,
    ) -> StoreResult<(Conversation, Message)>;

    /// All conversations, most recently updated first
    async fn list(&self) -> StoreResult<Vec<ConversationSummary>>;

    /// Remove conversations (and their messages) idle since before `cutoff`.
    /// Returns how many were removed.
    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> StoreResult<usize>;

    async fn add_message(&self, id: &str, sender: Sender, content: &str) -> StoreResult<Message> {
        Ok(self.append_message(id, sender, content).await?.message)
    }

    async fn take_over(&self, id: &str, admin: &str) -> StoreResult<Conversation> {
        self.apply_event(
            id,
            &HandoffEvent::TakeOver {
                admin: admin.to_string(),
            },
        )
        .await
    }

    async fn release_to_bot(&self, id: &str) -> StoreResult<Conversation> {
        self.apply_event(id, &HandoffEvent::Release).await
    }
}
