//! Chat domain layer: entities, handoff state machine, errors

pub mod entities;
pub mod error;
pub mod state;
