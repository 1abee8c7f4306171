//! Signups domain state and error rendering

use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use lagentry_common::Error;
use lagentry_email::{EmailService, Notifier};

/// Application state for the Signups domain
#[derive(Clone)]
pub struct SignupsState {
    pub notifier: Notifier,
}

impl SignupsState {
    pub fn new(email: Arc<dyn EmailService>) -> Self {
        Self {
            notifier: Notifier::new(email),
        }
    }
}

/// Error response for the public forms, which read failures from `message`
#[derive(Debug)]
pub struct SignupRejection(pub Error);

impl From<Error> for SignupRejection {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for SignupRejection {
    fn into_response(self) -> Response {
        self.0.into_response_with_key("message")
    }
}
