//! Common error types and handling for the Lagentry website API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Message returned to clients for failures whose details stay in the logs
pub const GENERIC_FAILURE: &str = "Internal server error";

/// Common error type for the Lagentry website API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Serialization(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for logs and metrics
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Error::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Text safe to show to API clients.
    ///
    /// `Internal` carries a caller-chosen generic message; serialization
    /// failures never expose their source.
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(msg) | Error::Internal(msg) => msg.clone(),
            Error::MethodNotAllowed | Error::PayloadTooLarge => self.to_string(),
            Error::Serialization(_) => GENERIC_FAILURE.to_string(),
        }
    }

    /// Render the error with the given message key.
    ///
    /// Admin endpoints report failures under `error`, the public signup
    /// forms under `message`.
    pub fn into_response_with_key(self, key: &'static str) -> Response {
        let status = self.status_code();

        // Log internal errors with full context
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, code = self.error_code(), "Internal server error");
        }

        let mut body = serde_json::Map::new();
        body.insert("success".to_string(), json!(false));
        body.insert(key.to_string(), json!(self.public_message()));

        (status, Json(serde_json::Value::Object(body))).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_response_with_key("error")
    }
}
