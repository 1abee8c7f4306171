//! API layer for the Signups domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::{SignupRejection, SignupsState};
pub use routes::routes;
