// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Notice board entries.
//!
//! Notices are public announcements managed by administrators. Ids are
//! generated from a monotonically increasing counter and never reused, so
//! "newest first" is simply "highest id first".

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{read_lock, write_lock};

/// A notice board entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Notice {
    /// Generated identifier
    pub id: u64,
    pub title: String,
    pub content: String,
    /// When the notice was posted
    pub created_at: DateTime<Utc>,
}

pub trait NoticeStore: Send + Sync {
    /// All notices, descending by id.
    fn find_all(&self) -> Vec<Notice>;

    /// Store a new notice under a fresh id.
    fn save(&self, title: &str, content: &str) -> Notice;

    /// Delete a notice. Returns whether it existed.
    fn delete_by_id(&self, id: u64) -> bool;
}

#[derive(Default)]
struct NoticeTable {
    next_id: u64,
    rows: BTreeMap<u64, Notice>,
}

/// `NoticeStore` backed by an ordered map.
#[derive(Default)]
pub struct InMemoryNoticeStore {
    table: RwLock<NoticeTable>,
}

impl InMemoryNoticeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoticeStore for InMemoryNoticeStore {
    fn find_all(&self) -> Vec<Notice> {
        read_lock(&self.table).rows.values().rev().cloned().collect()
    }

    fn save(&self, title: &str, content: &str) -> Notice {
        let mut table = write_lock(&self.table);
        table.next_id += 1;
        let notice = Notice {
            id: table.next_id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        table.rows.insert(notice.id, notice.clone());
        notice
    }

    fn delete_by_id(&self, id: u64) -> bool {
        write_lock(&self.table).rows.remove(&id).is_some()
    }
}
