//! Admin chat handlers: inspect, take over, release and reply

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use lagentry_common::{Error, LenientJson, Result};
use serde::Deserialize;
use serde_json::{json, Value};

use super::conversation_id;
use crate::api::middleware::ChatState;
use crate::service::admin_identity;

/// Body of a takeover request; may be empty
#[derive(Debug, Default, Deserialize)]
pub struct TakeoverRequest {
    #[serde(rename = "adminEmail")]
    pub admin_email: Option<String>,
}

/// Body of an admin reply
#[derive(Debug, Default, Deserialize)]
pub struct ReplyRequest {
    /// Kept untyped so a non-string message is reported as missing
    pub message: Option<Value>,
    #[serde(rename = "adminEmail")]
    pub admin_email: Option<String>,
}

impl ReplyRequest {
    fn message_text(&self) -> Result<&str> {
        match &self.message {
            Some(Value::String(text)) if !text.is_empty() => Ok(text),
            _ => Err(Error::Validation("Message is required".to_string())),
        }
    }
}

/// List all conversations, most recently active first
pub async fn list_conversations(State(state): State<ChatState>) -> Result<Json<Value>> {
    let store = state.store();

    // Lambda has no background sweeper, so expire idle conversations here
    if let Err(e) = state.retention.sweep_once(store.as_ref()).await {
        tracing::warn!(error = %e, "Retention sweep during listing failed");
    }

    let conversations = store
        .list()
        .await
        .map_err(|e| e.into_api_error("Failed to load conversations"))?;

    Ok(Json(json!({
        "success": true,
        "count": conversations.len(),
        "conversations": conversations,
    })))
}

/// Get one conversation with its messages, creating it if absent
pub async fn get_conversation(
    State(state): State<ChatState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Value>> {
    let id = conversation_id(path)?;

    let view = state
        .handoff
        .conversation(&id)
        .await
        .map_err(|e| e.into_api_error("Failed to load conversation"))?;

    let mut conversation = serde_json::to_value(&view.conversation)?;
    if let Value::Object(fields) = &mut conversation {
        fields.insert("messageCount".to_string(), json!(view.messages.len()));
    }

    Ok(Json(json!({
        "success": true,
        "conversation": conversation,
        "messages": view.messages,
    })))
}

/// Hand a conversation to a human admin
pub async fn take_over(
    State(state): State<ChatState>,
    path: std::result::Result<Path<String>, PathRejection>,
    LenientJson(req): LenientJson<TakeoverRequest>,
) -> Result<Json<Value>> {
    let id = conversation_id(path)?;
    let admin = admin_identity(req.admin_email.as_deref());

    let conversation = state
        .handoff
        .take_over(&id, &admin)
        .await
        .map_err(|e| e.into_api_error("Failed to take over conversation"))?;

    Ok(Json(json!({
        "success": true,
        "handoff_status": conversation.handoff_status,
        "conversation": conversation,
    })))
}

/// Return a conversation to the bot
pub async fn release(
    State(state): State<ChatState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Value>> {
    let id = conversation_id(path)?;

    let conversation = state
        .handoff
        .release_to_bot(&id)
        .await
        .map_err(|e| e.into_api_error("Failed to release conversation"))?;

    Ok(Json(json!({
        "success": true,
        "handoff_status": conversation.handoff_status,
        "conversation": conversation,
    })))
}

/// Send an admin reply, taking the conversation over if needed
pub async fn reply(
    State(state): State<ChatState>,
    path: std::result::Result<Path<String>, PathRejection>,
    LenientJson(req): LenientJson<ReplyRequest>,
) -> Result<Json<Value>> {
    let id = conversation_id(path)?;
    let text = req.message_text()?;
    let admin = admin_identity(req.admin_email.as_deref());

    let reply = state
        .handoff
        .reply_as_admin(&id, &admin, text)
        .await
        .map_err(|e| e.into_api_error("Failed to send reply"))?;

    Ok(Json(json!({
        "success": true,
        "message": "Reply sent successfully",
        "handoff_status": reply.conversation.handoff_status,
    })))
}
