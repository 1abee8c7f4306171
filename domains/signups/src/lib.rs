//! Signups domain: newsletter, waitlist and demo booking forms

pub mod api;
pub mod domain;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{DemoBookingRequest, SignupRequest, DEFAULT_DEMO_AGENT};

// Re-export API types
pub use api::routes;
pub use api::{SignupRejection, SignupsState};
