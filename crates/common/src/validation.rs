//! Validation helpers shared by the public form endpoints

use regex::Regex;
use validator::Validate;

use crate::Error;

lazy_static::lazy_static! {
    /// Loose email shape check: something@something.tld, no whitespace
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Validate an email address after trimming surrounding whitespace
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Trim an optional form field, treating blank values as absent
pub fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Run validator rules, collapsing failures into a single client-facing error.
///
/// When a failing rule carries a `message`, that message is returned verbatim.
pub fn validate_request<T: Validate>(value: &T) -> Result<(), Error> {
    value.validate().map_err(|errors| {
        let custom = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()));

        Error::Validation(custom.unwrap_or_else(|| format!("Validation failed: {}", errors)))
    })
}
