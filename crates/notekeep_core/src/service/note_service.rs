//! Note use-case service.
//!
//! # Responsibility
//! - Provide typed create/get/update/delete APIs over the notes endpoint.
//! - Unwrap the server's `{"note": ...}` response envelope.
//!
//! # Invariants
//! - These four operations are the only network path exposed by core.
//! - Each operation issues exactly one request and never retries.
//! - Input tags are forwarded exactly as given.

use crate::config::ApiConfig;
use crate::model::note::{CreateNoteInput, Note, NoteId, UpdateNoteInput};
use crate::transport::{
    unwrap_envelope, ApiRequest, ApiResult, HttpBackend, HttpMethod, ReqwestBackend, Transport,
};
use serde_json::Value;

const NOTES_PATH: &str = "/notes";
const NOTE_FIELD: &str = "note";

/// Note service facade over a transport.
pub struct NoteService<B: HttpBackend = ReqwestBackend> {
    transport: Transport<B>,
}

impl NoteService<ReqwestBackend> {
    /// Creates a service talking to `config`'s base endpoint over reqwest.
    pub fn new(config: ApiConfig) -> Self {
        Self::with_transport(Transport::new(config))
    }
}

impl<B: HttpBackend> NoteService<B> {
    pub fn with_transport(transport: Transport<B>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport<B> {
        &self.transport
    }

    /// Creates one note; the server assigns id, version and timestamp.
    pub fn create_note(&self, input: &CreateNoteInput) -> ApiResult<Note> {
        let request = ApiRequest::new(NOTES_PATH)
            .method(HttpMethod::Post)
            .json(input)?;
        self.fetch_note(&request)
    }

    /// Gets one note by id.
    ///
    /// A missing note surfaces as the server's error message (404).
    pub fn get_note(&self, id: NoteId) -> ApiResult<Note> {
        self.fetch_note(&ApiRequest::new(note_path(id)))
    }

    /// Replaces title, body and tags; touches `archived` only when set.
    pub fn update_note(&self, id: NoteId, input: &UpdateNoteInput) -> ApiResult<Note> {
        let request = ApiRequest::new(note_path(id))
            .method(HttpMethod::Put)
            .json(input)?;
        self.fetch_note(&request)
    }

    /// Deletes one note. Any success body is ignored.
    pub fn delete_note(&self, id: NoteId) -> ApiResult<()> {
        let request = ApiRequest::new(note_path(id)).method(HttpMethod::Delete);
        self.transport.send(&request)?;
        Ok(())
    }

    fn fetch_note(&self, request: &ApiRequest) -> ApiResult<Note> {
        let envelope: Value = self.transport.request(request)?;
        unwrap_envelope(envelope, NOTE_FIELD)
    }
}

fn note_path(id: NoteId) -> String {
    format!("{NOTES_PATH}/{id}")
}
