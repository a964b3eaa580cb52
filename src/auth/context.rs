// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-request identity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::{Role, Roles};
use crate::storage::UserRecord;

/// Identity resolved for the current request.
///
/// Built from the user store on every request, so role changes and
/// account deletion take effect without reissuing tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Canonical username (token `sub`)
    pub username: String,
    /// Roles currently granted in the user store
    #[schema(value_type = Vec<Role>)]
    pub roles: Roles,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_any_role(&self, roles: &Roles) -> bool {
        !self.roles.is_disjoint(roles)
    }
}

impl From<UserRecord> for AuthenticatedUser {
    fn from(user: UserRecord) -> Self {
        Self {
            username: user.username,
            roles: user.roles,
        }
    }
}

/// Request-scoped authentication state.
///
/// Inserted into the request extensions by the authorization step and
/// dropped with the request. Anonymous unless a valid token resolved to an
/// existing user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    identity: Option<AuthenticatedUser>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: AuthenticatedUser) -> Self {
        Self {
            identity: Some(user),
        }
    }

    pub fn identity(&self) -> Option<&AuthenticatedUser> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}
