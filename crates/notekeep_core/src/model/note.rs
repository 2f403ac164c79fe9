//! Note wire model.
//!
//! # Responsibility
//! - Define the server-owned `Note` record as it appears on the wire.
//! - Define the input shapes accepted by create and update calls.
//!
//! # Invariants
//! - `id`, `updated_at` and `version` are assigned by the server only.
//! - `UpdateNoteInput::archived == None` is omitted from the JSON body,
//!   never sent as `null`.
//! - Tags pass through untouched; normalization belongs to the caller.

use serde::{Deserialize, Serialize};

/// Server-assigned note identifier.
pub type NoteId = i64;

/// Note record returned by the notes API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable identifier; never changes after creation.
    pub id: NoteId,
    pub title: String,
    pub body: String,
    /// Caller-defined order, duplicates allowed.
    pub tags: Vec<String>,
    /// `false` for freshly created notes.
    pub archived: bool,
    /// Server timestamp, kept as the raw string the server sent.
    pub updated_at: String,
    /// Bumped by the server on every successful mutation.
    pub version: i64,
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNoteInput {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl CreateNoteInput {
    pub fn new(title: impl Into<String>, body: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags,
        }
    }
}

/// Body of an update request.
///
/// The server replaces title, body and tags wholesale. `archived` is only
/// touched when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNoteInput {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl UpdateNoteInput {
    /// Builds an update that leaves the archived flag unchanged.
    pub fn new(title: impl Into<String>, body: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags,
            archived: None,
        }
    }

    /// Sets the archived flag explicitly.
    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    /// Builds an update that keeps the note's current content and only
    /// changes its archived flag.
    pub fn archive_toggle(note: &Note, archived: bool) -> Self {
        Self {
            title: note.title.clone(),
            body: note.body.clone(),
            tags: note.tags.clone(),
            archived: Some(archived),
        }
    }
}
