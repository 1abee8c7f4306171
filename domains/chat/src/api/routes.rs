//! Route definitions for Chat domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{admin, method_not_allowed, visitor};
use super::middleware::ChatState;

/// Admin chat console routes
fn admin_routes() -> Router<ChatState> {
    Router::new()
        .route(
            "/api/admin/chat",
            get(admin::list_conversations).fallback(method_not_allowed),
        )
        .route(
            "/api/admin/chat/{conversation_id}",
            get(admin::get_conversation).fallback(method_not_allowed),
        )
        .route(
            "/api/admin/chat/{conversation_id}/takeover",
            post(admin::take_over).fallback(method_not_allowed),
        )
        .route(
            "/api/admin/chat/{conversation_id}/release",
            post(admin::release).fallback(method_not_allowed),
        )
        .route(
            "/api/admin/chat/{conversation_id}/reply",
            post(admin::reply).fallback(method_not_allowed),
        )
}

/// Chat widget routes
fn widget_routes() -> Router<ChatState> {
    Router::new().route(
        "/api/chat/{conversation_id}/messages",
        get(visitor::list_messages)
            .post(visitor::post_message)
            .fallback(method_not_allowed),
    )
}

/// Create all Chat domain API routes
pub fn routes() -> Router<ChatState> {
    Router::new().merge(admin_routes()).merge(widget_routes())
}
