//! SQLite bootstrap for client-local durable state.
//!
//! The state database holds one table, `local_store(key, value)`: a flat
//! string map mirroring browser `localStorage`. `SqliteLocalStore` reads and
//! writes it; today the only key is `noteIds`, the ownership tracker's
//! JSON-encoded id array. Notes themselves are never cached here.
//!
//! # Responsibility
//! - Open and configure the SQLite database backing `SqliteLocalStore`.
//! - Apply schema migrations before the connection is handed out.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Databases written by a newer build are rejected, not downgraded.
//! - `local_store.key` is unique; writes upsert the whole value.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "state database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
