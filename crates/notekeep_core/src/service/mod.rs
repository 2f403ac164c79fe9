//! Core use-case services.
//!
//! # Responsibility
//! - Turn note use-cases into transport calls.
//! - Keep presentation layers decoupled from HTTP details.

pub mod note_service;
