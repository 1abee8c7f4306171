//! In-memory conversation store
//!
//! Process-local only: state is lost on restart and not shared between
//! instances.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Appended, ConversationStore, StoreResult};
use crate::domain::entities::{
    validate_id, Conversation, ConversationSummary, HandoffStatus, Message, Sender, DEFAULT_ADMIN,
};
use crate::domain::error::ChatError;
use crate::domain::state::{HandoffEvent, HandoffStateMachine};

/// A conversation and its append-only message log
#[derive(Debug, Clone)]
struct Thread {
    conversation: Conversation,
    messages: Vec<Message>,
}

impl Thread {
    fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            conversation: self.conversation.clone(),
            message_count: self.messages.len(),
            last_message: self.messages.last().cloned(),
        }
    }

    fn append(&mut self, sender: Sender, content: &str, now: DateTime<Utc>) -> Message {
        let message = Message::new(&self.conversation.id, sender, content, now);
        self.messages.push(message.clone());
        self.conversation.touch(now);
        message
    }
}

/// Conversation store backed by a mutex-guarded map
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    threads: Arc<Mutex<HashMap<String, Thread>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<String, Thread>>> {
        self.threads
            .lock()
            .map_err(|e| ChatError::StorageUnavailable(e.to_string()))
    }

    /// Run `f` on the thread for `id`, creating it first if absent
    fn with_thread<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Thread, DateTime<Utc>) -> T,
    ) -> StoreResult<T> {
        validate_id(id)?;
        let now = Utc::now();
        let mut threads = self.lock()?;

        let thread = match threads.entry(id.to_string()) {
            std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
            std::collections::hash_map::Entry::Vacant(entry) => {
                tracing::debug!(conversation_id = %id, "Creating conversation");
                entry.insert(Thread {
                    conversation: Conversation::new(id, now)?,
                    messages: Vec::new(),
                })
            }
        };

        Ok(f(thread, now))
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get_or_create(&self, id: &str) -> StoreResult<Conversation> {
        self.with_thread(id, |thread, _| thread.conversation.clone())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Conversation>> {
        validate_id(id)?;
        Ok(self.lock()?.get(id).map(|t| t.conversation.clone()))
    }

    async fn get_messages(&self, id: &str) -> StoreResult<Vec<Message>> {
        validate_id(id)?;
        Ok(self
            .lock()?
            .get(id)
            .map(|t| t.messages.clone())
            .unwrap_or_default())
    }

    async fn append_message(
        &self,
        id: &str,
        sender: Sender,
        content: &str,
    ) -> StoreResult<Appended> {
        self.with_thread(id, |thread, now| {
            if sender == Sender::Admin && thread.conversation.handoff_status == HandoffStatus::Bot
            {
                let event = HandoffEvent::AdminReply {
                    admin: DEFAULT_ADMIN.to_string(),
                };
                HandoffStateMachine::apply(&mut thread.conversation, &event, now);
            }
            let message = thread.append(sender, content, now);
            Appended {
                conversation: thread.conversation.clone(),
                message,
                sender_count: thread.messages.iter().filter(|m| m.sender == sender).count(),
            }
        })
    }

    async fn apply_event(&self, id: &str, event: &HandoffEvent) -> StoreResult<Conversation> {
        self.with_thread(id, |thread, now| {
            HandoffStateMachine::apply(&mut thread.conversation, event, now);
            thread.conversation.clone()
        })
    }

    async fn apply_event_with_notice(
        &self,
        id: &str,
        event: &HandoffEvent,
        notice: &str,
    ) -> StoreResult<(Conversation, Message)> {
        self.with_thread(id, |thread, now| {
            HandoffStateMachine::apply(&mut thread.conversation, event, now);
            let message = thread.append(Sender::System, notice, now);
            (thread.conversation.clone(), message)
        })
    }

    async fn reply_as_admin(
        &self,
        id: &str,
        admin: &str,
        content: &str,
    ) -> StoreResult<(Conversation, Message)> {
        self.with_thread(id, |thread, now| {
            let event = HandoffEvent::AdminReply {
                admin: admin.to_string(),
            };
            HandoffStateMachine::apply(&mut thread.conversation, &event, now);
            let message = thread.append(Sender::Admin, content, now);
            (thread.conversation.clone(), message)
        })
    }

    async fn list(&self) -> StoreResult<Vec<ConversationSummary>> {
        let mut summaries: Vec<ConversationSummary> =
            self.lock()?.values().map(Thread::summary).collect();
        summaries.sort_by(|a, b| {
            b.conversation
                .updated_at
                .cmp(&a.conversation.updated_at)
                .then_with(|| a.conversation.id.cmp(&b.conversation.id))
        });
        Ok(summaries)
    }

    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> StoreResult<usize> {
        let mut threads = self.lock()?;
        let before = threads.len();
        threads.retain(|_, t| t.conversation.updated_at >= cutoff);
        Ok(before - threads.len())
    }
}
