//! HTTP handlers for the Signups domain

pub mod demo;
pub mod newsletter;

use lagentry_common::Error;

use super::middleware::SignupRejection;

/// Fallback for unsupported methods on signup routes
pub async fn method_not_allowed() -> SignupRejection {
    SignupRejection(Error::MethodNotAllowed)
}
