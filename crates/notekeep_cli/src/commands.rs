//! Command execution against the note service and ownership tracker.
//!
//! # Invariants
//! - Ownership is updated only after the matching API call succeeded.
//! - A failed delete never removes the id from ownership.

use crate::cli::{Command, NoteFields};
use crate::tags::parse_tags;
use anyhow::{Context, Result};
use log::info;
use notekeep_core::{
    CreateNoteInput, HttpBackend, LocalStore, Note, NoteId, NoteService, OwnershipTracker,
    UpdateNoteInput,
};

/// Runs `command` and returns the text to print.
pub fn execute<B, S>(
    command: Command,
    service: &NoteService<B>,
    tracker: &mut OwnershipTracker<S>,
) -> Result<String>
where
    B: HttpBackend,
    S: LocalStore,
{
    match command {
        Command::Create(fields) => {
            let input = CreateNoteInput::new(fields.title, fields.body, parse_tags(&fields.tags));
            let note = service.create_note(&input)?;
            remember(tracker, note.id)?;
            info!("event=note_created module=cli status=ok note_id={}", note.id);
            Ok(render_note(&note))
        }
        Command::Show { id } => {
            let note = service.get_note(id)?;
            remember(tracker, note.id)?;
            Ok(render_note(&note))
        }
        Command::Update {
            id,
            fields,
            archive,
            unarchive,
        } => {
            let archived = match (archive, unarchive) {
                (true, _) => Some(true),
                (false, true) => Some(false),
                (false, false) => None,
            };
            let note = service.update_note(id, &update_input(fields, archived))?;
            Ok(render_note(&note))
        }
        Command::Archive { id } => set_archived(service, id, true),
        Command::Unarchive { id } => set_archived(service, id, false),
        Command::Delete { id } => {
            service.delete_note(id)?;
            tracker
                .remove(id)
                .with_context(|| format!("note {id} deleted but could not be forgotten locally"))?;
            info!("event=note_deleted module=cli status=ok note_id={id}");
            Ok(format!("deleted note {id}"))
        }
        Command::List => Ok(render_ids(tracker.ids())),
        Command::Forget { id } => {
            if tracker.remove(id)? {
                Ok(format!("forgot note {id}"))
            } else {
                Ok(format!("note {id} was not tracked"))
            }
        }
    }
}

fn remember<S: LocalStore>(tracker: &mut OwnershipTracker<S>, id: NoteId) -> Result<()> {
    tracker
        .add(id)
        .with_context(|| format!("note {id} saved but could not be remembered locally"))?;
    Ok(())
}

fn update_input(fields: NoteFields, archived: Option<bool>) -> UpdateNoteInput {
    let input = UpdateNoteInput::new(fields.title, fields.body, parse_tags(&fields.tags));
    match archived {
        Some(flag) => input.with_archived(flag),
        None => input,
    }
}

fn set_archived<B: HttpBackend>(
    service: &NoteService<B>,
    id: NoteId,
    archived: bool,
) -> Result<String> {
    let current = service.get_note(id)?;
    let note = service.update_note(id, &UpdateNoteInput::archive_toggle(&current, archived))?;
    Ok(render_note(&note))
}

fn render_note(note: &Note) -> String {
    let mut out = format!("#{} {}", note.id, note.title);
    if note.archived {
        out.push_str(" [archived]");
    }
    out.push('\n');
    if !note.tags.is_empty() {
        out.push_str(&format!("tags: {}\n", note.tags.join(", ")));
    }
    out.push_str(&format!(
        "version: {}  updated: {}\n\n{}",
        note.version, note.updated_at, note.body
    ));
    out
}

fn render_ids(ids: &[NoteId]) -> String {
    if ids.is_empty() {
        return "no owned notes".to_string();
    }
    ids.iter()
        .map(NoteId::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::execute;
    use crate::cli::{Command, NoteFields};
    use notekeep_core::{
        ApiConfig, ApiResult, HttpBackend, HttpRequest, HttpResponse, MemoryLocalStore,
        NoteService, OwnershipTracker, Transport,
    };
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct FakeBackend {
        responses: RefCell<VecDeque<(u16, Value)>>,
        bodies: RefCell<Vec<Option<String>>>,
    }

    impl HttpBackend for FakeBackend {
        fn execute(&self, request: &HttpRequest<'_>) -> ApiResult<HttpResponse> {
            self.bodies
                .borrow_mut()
                .push(request.body.map(str::to_string));
            let (status, body) = self.responses.borrow_mut().pop_front().unwrap();
            Ok(HttpResponse {
                status,
                body: body.to_string().into_bytes(),
            })
        }
    }

    fn service(responses: Vec<(u16, Value)>) -> NoteService<FakeBackend> {
        let backend = FakeBackend {
            responses: RefCell::new(responses.into()),
            bodies: RefCell::default(),
        };
        let config = ApiConfig::new("http://localhost:4000/v1").unwrap();
        NoteService::with_transport(Transport::with_backend(config, backend))
    }

    fn note(id: i64, archived: bool) -> Value {
        json!({"note": {
            "id": id,
            "title": "T",
            "body": "B",
            "tags": ["x", "y"],
            "archived": archived,
            "updated_at": "2024-01-01T00:00:00Z",
            "version": 1
        }})
    }

    fn fields(tags: &str) -> NoteFields {
        NoteFields {
            title: "T".to_string(),
            body: "B".to_string(),
            tags: tags.to_string(),
        }
    }

    #[test]
    fn create_sends_normalized_tags_and_tracks_id() {
        let service = service(vec![(201, note(1, false))]);
        let store = MemoryLocalStore::new();
        let mut tracker = OwnershipTracker::load(&store).unwrap();

        let output = execute(Command::Create(fields(" x, ,y ")), &service, &mut tracker).unwrap();

        assert!(output.starts_with("#1 T"));
        assert_eq!(tracker.ids(), &[1]);
        let sent = service.transport().backend().bodies.borrow()[0].clone().unwrap();
        let sent: Value = serde_json::from_str(&sent).unwrap();
        assert_eq!(sent["tags"], json!(["x", "y"]));
    }

    #[test]
    fn failed_delete_keeps_ownership() {
        let service = service(vec![(404, json!({"error": "Not found"}))]);
        let store = MemoryLocalStore::new();
        let mut tracker = OwnershipTracker::load(&store).unwrap();
        tracker.add(999).unwrap();

        let err = execute(Command::Delete { id: 999 }, &service, &mut tracker).unwrap_err();

        assert_eq!(err.to_string(), "Not found");
        assert_eq!(tracker.ids(), &[999]);
    }

    #[test]
    fn successful_delete_forgets_id() {
        let service = service(vec![(200, json!({"message": "note successfully deleted"}))]);
        let store = MemoryLocalStore::new();
        let mut tracker = OwnershipTracker::load(&store).unwrap();
        tracker.add(2).unwrap();

        execute(Command::Delete { id: 2 }, &service, &mut tracker).unwrap();
        assert!(tracker.is_empty());
    }

    #[test]
    fn update_without_flags_leaves_archived_unset() {
        let service = service(vec![(200, note(5, false))]);
        let store = MemoryLocalStore::new();
        let mut tracker = OwnershipTracker::load(&store).unwrap();
        let command = Command::Update {
            id: 5,
            fields: fields("x"),
            archive: false,
            unarchive: false,
        };

        execute(command, &service, &mut tracker).unwrap();

        let sent = service.transport().backend().bodies.borrow()[0].clone().unwrap();
        let sent: Value = serde_json::from_str(&sent).unwrap();
        assert!(sent.get("archived").is_none());
        assert!(tracker.is_empty());
    }

    #[test]
    fn archive_keeps_current_content() {
        let service = service(vec![(200, note(5, false)), (200, note(5, true))]);
        let store = MemoryLocalStore::new();
        let mut tracker = OwnershipTracker::load(&store).unwrap();

        let output = execute(Command::Archive { id: 5 }, &service, &mut tracker).unwrap();

        assert!(output.contains("[archived]"));
        let bodies = service.transport().backend().bodies.borrow().clone();
        assert_eq!(bodies[0], None);
        let sent: Value = serde_json::from_str(bodies[1].as_deref().unwrap()).unwrap();
        assert_eq!(
            sent,
            json!({"title": "T", "body": "B", "tags": ["x", "y"], "archived": true})
        );
    }

    #[test]
    fn list_and_forget_are_local() {
        let service = service(Vec::new());
        let store = MemoryLocalStore::new();
        let mut tracker = OwnershipTracker::load(&store).unwrap();
        assert_eq!(
            execute(Command::List, &service, &mut tracker).unwrap(),
            "no owned notes"
        );

        tracker.add(3).unwrap();
        tracker.add(8).unwrap();
        assert_eq!(execute(Command::List, &service, &mut tracker).unwrap(), "3\n8");
        assert_eq!(
            execute(Command::Forget { id: 3 }, &service, &mut tracker).unwrap(),
            "forgot note 3"
        );
        assert_eq!(
            execute(Command::Forget { id: 3 }, &service, &mut tracker).unwrap(),
            "note 3 was not tracked"
        );
    }
}
