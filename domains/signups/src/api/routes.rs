//! Route definitions for Signups domain API

use axum::{routing::post, Router};

use super::handlers::{demo, method_not_allowed, newsletter};
use super::middleware::SignupsState;

/// Create all Signups domain API routes
pub fn routes() -> Router<SignupsState> {
    Router::new()
        .route(
            "/api/newsletter",
            post(newsletter::subscribe_newsletter).fallback(method_not_allowed),
        )
        .route(
            "/api/waitlist",
            post(newsletter::join_waitlist).fallback(method_not_allowed),
        )
        .route(
            "/api/book-demo",
            post(demo::book_demo).fallback(method_not_allowed),
        )
}
