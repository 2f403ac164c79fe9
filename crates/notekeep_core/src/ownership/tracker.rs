//! Session note-ownership tracker.
//!
//! # Responsibility
//! - Remember which note ids this client created or opened.
//! - Mirror the id set to durable local storage on every mutation.
//!
//! # Invariants
//! - Ids are unique and keep insertion order.
//! - After `add`/`remove` return `Ok`, storage holds exactly `ids()`.
//! - A failed persist leaves the in-memory set unchanged.
//! - Corrupt persisted state loads as an empty set, never as an error.

use super::store::{LocalStore, StoreResult};
use crate::model::note::NoteId;
use log::{debug, error, info, warn};

/// Storage key holding the JSON-encoded id array.
pub const OWNERSHIP_KEY: &str = "noteIds";

/// Ordered set of note ids owned by this client.
pub struct OwnershipTracker<S: LocalStore> {
    store: S,
    ids: Vec<NoteId>,
}

impl<S: LocalStore> OwnershipTracker<S> {
    /// Loads the persisted id set from `store`.
    ///
    /// # Errors
    /// - Returns an error only when the store itself cannot be read.
    pub fn load(store: S) -> StoreResult<Self> {
        let ids = match store.get_item(OWNERSHIP_KEY)? {
            Some(raw) => parse_ids(&raw),
            None => Vec::new(),
        };
        info!(
            "event=ownership_load module=ownership status=ok count={}",
            ids.len()
        );
        Ok(Self { store, ids })
    }

    /// Records `id` as owned. Returns `true` when the set changed.
    pub fn add(&mut self, id: NoteId) -> StoreResult<bool> {
        if self.contains(id) {
            self.persist()?;
            return Ok(false);
        }

        self.ids.push(id);
        if let Err(err) = self.persist() {
            self.ids.pop();
            return Err(err);
        }
        Ok(true)
    }

    /// Forgets `id`. Returns `true` when the set changed.
    pub fn remove(&mut self, id: NoteId) -> StoreResult<bool> {
        let Some(position) = self.ids.iter().position(|owned| *owned == id) else {
            self.persist()?;
            return Ok(false);
        };

        self.ids.remove(position);
        if let Err(err) = self.persist() {
            self.ids.insert(position, id);
            return Err(err);
        }
        Ok(true)
    }

    /// Owned ids in insertion order.
    pub fn ids(&self) -> &[NoteId] {
        &self.ids
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&self) -> StoreResult<()> {
        let encoded = serde_json::to_string(&self.ids)?;
        match self.store.set_item(OWNERSHIP_KEY, &encoded) {
            Ok(()) => {
                debug!(
                    "event=ownership_persist module=ownership status=ok count={}",
                    self.ids.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=ownership_persist module=ownership status=error error={}",
                    err
                );
                Err(err)
            }
        }
    }
}

fn parse_ids(raw: &str) -> Vec<NoteId> {
    match serde_json::from_str::<Vec<NoteId>>(raw) {
        Ok(parsed) => {
            let mut ids = Vec::with_capacity(parsed.len());
            for id in parsed {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
            ids
        }
        Err(err) => {
            warn!(
                "event=ownership_load module=ownership status=degraded error_code=corrupt_state error={}",
                err
            );
            Vec::new()
        }
    }
}
