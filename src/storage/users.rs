// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User records.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{normalize_username, read_lock, write_lock, StorageError, StorageResult};
use crate::auth::{Role, Roles};

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique, normalized username
    pub username: String,
    /// Argon2 PHC hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Granted roles
    pub roles: Roles,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(username: &str, password_hash: impl Into<String>, roles: Roles) -> Self {
        Self {
            username: normalize_username(username),
            password_hash: password_hash.into(),
            roles,
            created_at: Utc::now(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Lookup of accounts by username.
pub trait UserStore: Send + Sync {
    /// Find a user by (raw) username. Returns `None` when absent.
    fn find_by_username(&self, username: &str) -> Option<UserRecord>;

    /// Register a new user. Fails if the username is taken.
    fn insert(&self, user: UserRecord) -> StorageResult<()>;

    /// Remove a user. Tokens already issued for it stop resolving.
    fn delete(&self, username: &str) -> StorageResult<()>;
}

/// `UserStore` backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        read_lock(&self.users)
            .get(&normalize_username(username))
            .cloned()
    }

    fn insert(&self, user: UserRecord) -> StorageResult<()> {
        let key = normalize_username(&user.username);
        if key.is_empty() {
            return Err(StorageError::InvalidInput("username must not be blank".into()));
        }

        let mut users = write_lock(&self.users);
        if users.contains_key(&key) {
            return Err(StorageError::AlreadyExists(format!("User {key}")));
        }
        users.insert(
            key.clone(),
            UserRecord {
                username: key,
                ..user
            },
        );
        Ok(())
    }

    fn delete(&self, username: &str) -> StorageResult<()> {
        let key = normalize_username(username);
        match write_lock(&self.users).remove(&key) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound(format!("User {key}"))),
        }
    }
}
