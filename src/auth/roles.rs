// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// Roles are plain tags. There is no hierarchy: holding `Admin` does not
/// imply `User`, so accounts that need both carry both.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular signed-up member (personal notes)
    User,
    /// Board administrator (notice management, admin overview)
    Admin,
}

/// Set of roles held by a user, ordered for stable serialization.
pub type Roles = BTreeSet<Role>;

impl Role {
    /// Stable upper-case name used on the wire and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_upper_case() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, r#""ADMIN""#);
        let parsed: Role = serde_json::from_str(r#""USER""#).unwrap();
        assert_eq!(parsed, Role::User);
    }

    #[test]
    fn admin_does_not_imply_user() {
        let roles: Roles = [Role::Admin].into_iter().collect();
        assert!(!roles.contains(&Role::User));
    }
}
