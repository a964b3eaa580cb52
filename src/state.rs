// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{AccessPolicy, TokenCodec};
use crate::storage::{
    InMemoryNoteStore, InMemoryNoticeStore, InMemoryUserStore, NoteStore, NoticeStore, UserStore,
};

/// Shared application state.
///
/// Everything here is either immutable (codec, policy) or synchronized
/// inside the store, so cloning per request is cheap and lock-free.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub notices: Arc<dyn NoticeStore>,
    pub notes: Arc<dyn NoteStore>,
    pub tokens: Arc<TokenCodec>,
    pub policy: Arc<AccessPolicy>,
}

impl AppState {
    /// State with empty in-memory stores and the notice board policy.
    pub fn new(tokens: TokenCodec) -> Self {
        Self {
            users: Arc::new(InMemoryUserStore::new()),
            notices: Arc::new(InMemoryNoticeStore::new()),
            notes: Arc::new(InMemoryNoteStore::new()),
            tokens: Arc::new(tokens),
            policy: Arc::new(AccessPolicy::notice_board()),
        }
    }

    /// Replace the route policy.
    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = Arc::new(policy);
        self
    }
}
