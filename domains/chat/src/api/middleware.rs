//! Chat domain state

use std::sync::Arc;

use lagentry_common::Config;
use lagentry_email::{EmailService, Notifier};

use crate::repository::{ConversationStore, InMemoryConversationStore, RetentionPolicy};
use crate::service::HandoffService;

/// Application state for the Chat domain
#[derive(Clone)]
pub struct ChatState {
    pub handoff: HandoffService,
    pub notifier: Notifier,
    pub retention: RetentionPolicy,
}

impl ChatState {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        email: Arc<dyn EmailService>,
        retention: RetentionPolicy,
    ) -> Self {
        Self {
            handoff: HandoffService::new(store),
            notifier: Notifier::new(email),
            retention,
        }
    }

    /// State over a fresh in-memory store, with retention from `config`
    pub fn in_memory(config: &Config, email: Arc<dyn EmailService>) -> Self {
        Self::new(
            Arc::new(InMemoryConversationStore::new()),
            email,
            RetentionPolicy::from_config(config),
        )
    }

    pub fn store(&self) -> &Arc<dyn ConversationStore> {
        self.handoff.store()
    }
}
