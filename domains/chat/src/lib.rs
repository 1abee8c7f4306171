//! Chat domain: conversation store, bot/human handoff, admin chat API

pub mod api;
pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    Conversation, ConversationStatus, ConversationSummary, HandoffStatus, Message, Sender,
    DEFAULT_ADMIN,
};
pub use domain::error::ChatError;
pub use domain::state::{HandoffEvent, HandoffStateMachine};

// Re-export repository types
pub use repository::{
    spawn_retention_sweeper, Appended, ConversationStore, InMemoryConversationStore, RetentionPolicy,
    StoreResult,
};

// Re-export service types
pub use service::{admin_identity, AdminReply, ConversationView, HandoffService};

// Re-export API types
pub use api::routes;
pub use api::ChatState;
