//! Signups domain layer: form payloads and their validation

pub mod entities;
