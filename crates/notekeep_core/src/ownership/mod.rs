//! Client-local note ownership.
//!
//! # Responsibility
//! - Track note ids owned by this client across restarts.
//! - Abstract the durable key/value storage behind `LocalStore`.
//!
//! # Invariants
//! - Ownership never validates ids against the server.

mod store;
mod tracker;

pub use store::{LocalStore, MemoryLocalStore, SqliteLocalStore, StoreError, StoreResult};
pub use tracker::{OwnershipTracker, OWNERSHIP_KEY};
