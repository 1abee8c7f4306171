//! Lagentry website API composition root
//!
//! Composes the domain routers into a single application and owns the
//! cross-cutting HTTP layers shared by both binaries.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use lagentry_chat::ChatState;
use lagentry_common::Config;
use lagentry_email::{EmailConfig, EmailService, EmailServiceFactory};
use lagentry_signups::SignupsState;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the email service selected by the environment
pub async fn email_service_from_env() -> anyhow::Result<Arc<dyn EmailService>> {
    let email_config = EmailConfig::from_env()?;
    let email_service = EmailServiceFactory::create(email_config).await?;
    Ok(Arc::from(email_service))
}

/// Compose domain routers with shared infrastructure routes
pub fn build_router(chat: ChatState, signups: SignupsState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/",
            get(|| async { concat!("Lagentry Website API v", env!("CARGO_PKG_VERSION")) }),
        )
        .merge(lagentry_chat::routes().with_state(chat))
        .merge(lagentry_signups::routes().with_state(signups))
}

/// Create the main application router with all routes and middleware
pub fn create_app(config: &Config, email_service: Arc<dyn EmailService>) -> Router {
    let chat = ChatState::in_memory(config, email_service.clone());
    let signups = SignupsState::new(email_service);
    with_middleware(build_router(chat, signups), config)
}

/// Wrap a router in tracing, CORS and the body size limit
pub fn with_middleware(router: Router, config: &Config) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.allowed_origins()))
        .layer(body_limit_layer())
}

/// CORS for the marketing site and admin panel.
///
/// Only listed origins are echoed back; credentials are allowed, so a
/// wildcard origin is never sent. Unparseable origins are skipped.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    tracing::debug!(origins = ?origins, "Configured CORS origins");

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Reject request bodies larger than [`MAX_BODY_BYTES`]
pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
