//! HTTP handlers for the Chat domain

pub mod admin;
pub mod visitor;

use axum::extract::{rejection::PathRejection, Path};
use lagentry_common::Error;

use crate::domain::entities::validate_id;

/// Extract and check the conversation id path segment
pub(crate) fn conversation_id(
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<String, Error> {
    let id = path
        .map(|Path(id)| id)
        .map_err(|_| Error::Validation("Conversation ID is required".to_string()))?;
    validate_id(&id)?;
    Ok(id)
}

/// Fallback for unsupported methods on chat routes
pub async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}
