//! Shared utilities, configuration, and error handling for the Lagentry website API
//!
//! This crate provides common functionality used across the API:
//! - Configuration management following 12-factor principles
//! - Error types and their JSON rendering
//! - Request extractors and form validation helpers

pub mod config;
pub mod error;
pub mod extractors;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result, GENERIC_FAILURE};
pub use extractors::{LenientJson, ValidatedJson};
pub use validation::{is_valid_email, trimmed, validate_request};
