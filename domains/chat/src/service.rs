//! Handoff service: store transitions plus the system messages that must
//! accompany them

use std::sync::Arc;

use lagentry_common::trimmed;
use serde::Serialize;

use crate::domain::entities::{Conversation, Message, DEFAULT_ADMIN};
use crate::domain::state::HandoffEvent;
use crate::repository::{ConversationStore, StoreResult};

/// Announced to the visitor when an admin takes over
pub const TAKEOVER_NOTICE: &str = "A human agent has joined the conversation.";

/// Announced to the visitor when the bot regains control
pub const RELEASE_NOTICE: &str = "The conversation has been returned to the AI assistant.";

/// Result of an admin reply
#[derive(Debug, Clone, Serialize)]
pub struct AdminReply {
    pub conversation: Conversation,
    pub message: Message,
}

/// A conversation with its full message history
#[derive(Debug, Clone, Serialize)]
pub struct ConversationView {
    pub conversation: Conversation,
    pub messages: Vec<Message>,
}

/// Resolve the admin identity, falling back to the generic one when absent
/// or blank
pub fn admin_identity(admin: Option<&str>) -> String {
    trimmed(admin).unwrap_or(DEFAULT_ADMIN).to_string()
}

/// Drives handoff transitions over a conversation store
#[derive(Clone)]
pub struct HandoffService {
    store: Arc<dyn ConversationStore>,
}

impl HandoffService {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ConversationStore> {
        &self.store
    }

    /// Hand the conversation to `admin` and announce it
    pub async fn take_over(&self, id: &str, admin: &str) -> StoreResult<Conversation> {
        let event = HandoffEvent::TakeOver {
            admin: admin.to_string(),
        };
        let (conversation, _) = self
            .store
            .apply_event_with_notice(id, &event, TAKEOVER_NOTICE)
            .await?;

        tracing::info!(conversation_id = %id, admin = %admin, "Conversation taken over");
        Ok(conversation)
    }

    /// Return the conversation to the bot and announce it
    pub async fn release_to_bot(&self, id: &str) -> StoreResult<Conversation> {
        let (conversation, _) = self
            .store
            .apply_event_with_notice(id, &HandoffEvent::Release, RELEASE_NOTICE)
            .await?;

        tracing::info!(conversation_id = %id, "Conversation released to bot");
        Ok(conversation)
    }

    /// Record an admin reply, taking the conversation over first if the bot
    /// still has it
    pub async fn reply_as_admin(
        &self,
        id: &str,
        admin: &str,
        content: &str,
    ) -> StoreResult<AdminReply> {
        let (conversation, message) = self.store.reply_as_admin(id, admin, content).await?;

        tracing::info!(conversation_id = %id, admin = %admin, "Admin reply recorded");
        Ok(AdminReply {
            conversation,
            message,
        })
    }

    /// Load (creating if needed) a conversation with its messages
    pub async fn conversation(&self, id: &str) -> StoreResult<ConversationView> {
        let conversation = self.store.get_or_create(id).await?;
        let messages = self.store.get_messages(id).await?;
        Ok(ConversationView {
            conversation,
            messages,
        })
    }
}
