//! Domain model shared by the service and presentation layers.
//!
//! # Responsibility
//! - Define the note record and request input shapes used on the wire.
//!
//! # Invariants
//! - Server-assigned fields never appear in input shapes.

pub mod note;
