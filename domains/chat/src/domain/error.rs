//! Chat core error taxonomy

use lagentry_common::{Error, GENERIC_FAILURE};
use thiserror::Error;

/// Errors raised by the conversation store and handoff service
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChatError {
    #[error("Conversation ID is required")]
    MissingIdentifier,

    #[error("Invalid sender '{0}': expected one of user, admin, bot, system")]
    InvalidSender(String),

    #[error("Conversation store unavailable: {0}")]
    StorageUnavailable(String),
}

impl ChatError {
    /// Map to an API error, replacing server-side detail with `failure`.
    ///
    /// Client mistakes keep their own message; storage failures are logged
    /// and surface only as the endpoint's generic failure text.
    pub fn into_api_error(self, failure: &str) -> Error {
        match self {
            ChatError::MissingIdentifier | ChatError::InvalidSender(_) => {
                Error::Validation(self.to_string())
            }
            ChatError::StorageUnavailable(detail) => {
                tracing::error!(error = %detail, "{}", failure);
                Error::Internal(failure.to_string())
            }
        }
    }
}

impl From<ChatError> for Error {
    fn from(err: ChatError) -> Self {
        err.into_api_error(GENERIC_FAILURE)
    }
}
