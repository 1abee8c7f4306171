//! Chat widget handlers: visitor and bot messages

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use lagentry_common::{Error, Result, ValidatedJson};
use lagentry_email::{ChatAlert, Notification};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use super::conversation_id;
use crate::api::middleware::ChatState;
use crate::domain::entities::Sender;

/// Message posted by the chat widget
#[derive(Debug, Deserialize, Validate)]
pub struct PostMessageRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Sender is required"))]
    pub sender: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Message is required"))]
    pub content: String,
}

/// Widget-facing senders; admin and system messages come from the admin API
fn widget_sender(tag: &str) -> Result<Sender> {
    match tag.parse::<Sender>()? {
        sender @ (Sender::User | Sender::Bot) => Ok(sender),
        other => Err(Error::Validation(format!(
            "Sender '{}' cannot post through the chat widget",
            other
        ))),
    }
}

/// Append a visitor or bot message.
///
/// The first visitor message of a conversation alerts the team by email.
pub async fn post_message(
    State(state): State<ChatState>,
    path: std::result::Result<Path<String>, PathRejection>,
    ValidatedJson(req): ValidatedJson<PostMessageRequest>,
) -> Result<Json<Value>> {
    let id = conversation_id(path)?;
    let sender = widget_sender(&req.sender)?;
    let appended = state
        .store()
        .append_message(&id, sender, &req.content)
        .await
        .map_err(|e| e.into_api_error("Failed to save message"))?;

    let is_first_visitor_message = sender == Sender::User && appended.is_first_from_sender();

    if is_first_visitor_message {
        tracing::info!(conversation_id = %id, "New chat conversation started");
        state
            .notifier
            .notify(Notification::ChatNotification(ChatAlert {
                conversation_id: id.clone(),
                user_message: appended.message.content.clone(),
                timestamp: appended.message.timestamp,
            }));
    }

    Ok(Json(json!({
        "success": true,
        "message": appended.message,
        "handoff_status": appended.conversation.handoff_status,
    })))
}

/// Poll a conversation's messages without creating it
pub async fn list_messages(
    State(state): State<ChatState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Value>> {
    let id = conversation_id(path)?;
    let store = state.store();

    let conversation = store
        .get(&id)
        .await
        .map_err(|e| e.into_api_error("Failed to load messages"))?;
    let messages = store
        .get_messages(&id)
        .await
        .map_err(|e| e.into_api_error("Failed to load messages"))?;

    Ok(Json(json!({
        "success": true,
        "handoff_status": conversation.map(|c| c.handoff_status).unwrap_or_default(),
        "messages": messages,
    })))
}
