// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Personal notes.
//!
//! Each note belongs to the user that wrote it. Owners see only their own
//! notes; administrators get a read-only view of every note.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{normalize_username, read_lock, write_lock, StorageError, StorageResult};

/// A personal note.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Note {
    /// Generated identifier
    pub id: u64,
    /// Username of the author
    pub owner: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

pub trait NoteStore: Send + Sync {
    /// Notes written by `owner`, newest first.
    fn find_by_owner(&self, owner: &str) -> Vec<Note>;

    /// Every note, newest first.
    fn find_all(&self) -> Vec<Note>;

    fn save(&self, owner: &str, title: &str, content: &str) -> Note;

    /// Delete a note only if `owner` wrote it.
    ///
    /// A note owned by someone else is reported as `NotFound` so callers
    /// cannot probe for other users' ids.
    fn delete_owned(&self, owner: &str, id: u64) -> StorageResult<()>;
}

#[derive(Default)]
struct NoteTable {
    next_id: u64,
    rows: BTreeMap<u64, Note>,
}

#[derive(Default)]
pub struct InMemoryNoteStore {
    table: RwLock<NoteTable>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteStore for InMemoryNoteStore {
    fn find_by_owner(&self, owner: &str) -> Vec<Note> {
        let owner = normalize_username(owner);
        read_lock(&self.table)
            .rows
            .values()
            .rev()
            .filter(|note| note.owner == owner)
            .cloned()
            .collect()
    }

    fn find_all(&self) -> Vec<Note> {
        read_lock(&self.table).rows.values().rev().cloned().collect()
    }

    fn save(&self, owner: &str, title: &str, content: &str) -> Note {
        let mut table = write_lock(&self.table);
        table.next_id += 1;
        let note = Note {
            id: table.next_id,
            owner: normalize_username(owner),
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        table.rows.insert(note.id, note.clone());
        note
    }

    fn delete_owned(&self, owner: &str, id: u64) -> StorageResult<()> {
        let owner = normalize_username(owner);
        let mut table = write_lock(&self.table);
        match table.rows.get(&id) {
            Some(note) if note.owner == owner => {
                table.rows.remove(&id);
                Ok(())
            }
            _ => Err(StorageError::NotFound(format!("Note {id}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_owner_filters_and_orders() {
        let store = InMemoryNoteStore::new();
        let a1 = store.save("alice", "a1", "");
        store.save("bob", "b1", "");
        let a2 = store.save("alice", "a2", "");

        assert_eq!(store.find_by_owner("alice"), vec![a2, a1]);
        assert_eq!(store.find_all().len(), 3);
    }

    #[test]
    fn delete_owned_rejects_other_owner() {
        let store = InMemoryNoteStore::new();
        let note = store.save("alice", "secret", "");

        assert!(matches!(
            store.delete_owned("bob", note.id),
            Err(StorageError::NotFound(_))
        ));
        assert_eq!(store.find_all().len(), 1);

        store.delete_owned("alice", note.id).unwrap();
        assert!(store.find_all().is_empty());
    }
}
