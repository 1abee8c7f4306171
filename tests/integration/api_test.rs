//! API endpoint integration tests
//!
//! Router-level tests for the chat, signup and CORS behaviour of the
//! composed application.

#![allow(dead_code)]

mod chat;
mod common;
mod cors;
mod signups;
