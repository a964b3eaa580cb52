// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the REST API. Stored entities
//! ([`Notice`](crate::storage::Notice), [`Note`](crate::storage::Note)) are
//! returned as-is; everything here is wire-only.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::{AuthenticatedUser, Role};
use crate::storage::UserRecord;

// =============================================================================
// Users
// =============================================================================

/// Account registration body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    pub username: String,
    pub roles: Vec<Role>,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            username: user.username,
            roles: user.roles.into_iter().collect(),
        }
    }
}

impl From<AuthenticatedUser> for UserResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            username: user.username,
            roles: user.roles.into_iter().collect(),
        }
    }
}

// =============================================================================
// Notices and Notes
// =============================================================================

/// Body for creating a notice or a note.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    /// Title must not be blank; content may be empty.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title must not be blank");
        }
        Ok(())
    }
}

/// `?id=` selector for deletions.
///
/// Ids travel as a query parameter so the route path stays exactly
/// `/notice` or `/note` and the access policy rows apply unchanged.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct IdQuery {
    pub id: u64,
}

// =============================================================================
// Home
// =============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub service: String,
    pub login: String,
    pub signup: String,
}
