//! Client core for notekeep.
//!
//! Two independent pieces are exposed to presentation layers:
//! - `NoteService`: typed create/get/update/delete calls against the notes API.
//! - `OwnershipTracker`: the durable set of note ids this client owns.
//!
//! Callers keep the two consistent: `add` after a successful create or get,
//! `remove` only after a successful delete.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod ownership;
pub mod service;
pub mod transport;

pub use config::{ApiConfig, ConfigError, BASE_URL_ENV};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{CreateNoteInput, Note, NoteId, UpdateNoteInput};
pub use ownership::{
    LocalStore, MemoryLocalStore, OwnershipTracker, SqliteLocalStore, StoreError, StoreResult,
    OWNERSHIP_KEY,
};
pub use service::note_service::NoteService;
pub use transport::{
    ApiError, ApiRequest, ApiResult, HttpBackend, HttpMethod, HttpRequest, HttpResponse,
    ReqwestBackend, Transport,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
