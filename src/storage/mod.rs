// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Collaborators
//!
//! The auth core and the handlers talk to storage through small traits so
//! the backing store can be swapped without touching the request pipeline.
//! The bundled implementations keep everything in process memory.
//!
//! | Store | Key | Ordering |
//! |-------|-----|----------|
//! | [`UserStore`] | NFKC-normalized username | none |
//! | [`NoticeStore`] | generated `u64` id | newest (highest id) first |
//! | [`NoteStore`] | generated `u64` id, owned by a username | newest first |
//!
//! All calls are synchronous; locks are held only for the duration of one
//! call and a poisoned lock is recovered rather than propagated.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use unicode_normalization::UnicodeNormalization;

pub mod notes;
pub mod notices;
pub mod users;

pub use notes::{InMemoryNoteStore, Note, NoteStore};
pub use notices::{InMemoryNoticeStore, Notice, NoticeStore};
pub use users::{InMemoryUserStore, UserRecord, UserStore};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Canonical form of a username used as the store key.
///
/// Applies NFKC and trims surrounding whitespace so visually identical
/// names cannot register twice.
pub fn normalize_username(raw: &str) -> String {
    raw.nfkc().collect::<String>().trim().to_string()
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_username_trims_and_folds_compatibility_forms() {
        assert_eq!(normalize_username("  alice "), "alice");
        // Fullwidth latin folds to ASCII under NFKC.
        assert_eq!(normalize_username("ａｌｉｃｅ"), "alice");
    }
}
