//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for all integration tests:
//! - An application wired to a capturing mock email service
//! - Request builders and JSON body parsing

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use lagentry_app::{build_router, with_middleware};
use lagentry_chat::{ChatState, ConversationStore};
use lagentry_common::Config;
use lagentry_email::mock::MockEmailService;
use lagentry_signups::SignupsState;

/// Application under test with handles on its collaborators
pub struct TestApp {
    pub router: Router,
    pub email: MockEmailService,
    pub chat: ChatState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let email = MockEmailService::new();
        let chat = ChatState::in_memory(&config, Arc::new(email.clone()));
        let signups = SignupsState::new(Arc::new(email.clone()));
        let router = with_middleware(build_router(chat.clone(), signups), &config);

        Self {
            router,
            email,
            chat,
        }
    }

    pub fn store(&self) -> &Arc<dyn ConversationStore> {
        self.chat.store()
    }

    /// Send one request through a clone of the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send a request and return status plus parsed JSON body
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (axum::http::StatusCode, Value) {
        let response = self.send(json_request(method, uri, body)).await;
        let status = response.status();
        (status, parse_body(response).await)
    }

    /// Wait for background notifications to land in the mock
    pub async fn wait_for_emails(&self, expected: usize) {
        for _ in 0..200 {
            if self.email.email_count() >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

/// Helper: build a JSON request
pub fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);

    match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&b).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Helper: parse response body as JSON Value
pub async fn parse_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
