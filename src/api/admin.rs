// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{auth::Auth, state::AppState, storage::Note};

/// Read-only view over every user's notes.
#[utoipa::path(
    get,
    path = "/admin",
    tag = "Admin",
    security(("token" = [])),
    responses(
        (status = 200, description = "All notes, newest first", body = Vec<Note>),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Caller is not an administrator"),
    )
)]
pub async fn list_all_notes(State(state): State<AppState>, Auth(user): Auth) -> Json<Vec<Note>> {
    tracing::debug!(admin = %user.username, "listing all notes");
    Json(state.notes.find_all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthenticatedUser, Role, TokenCodec};

    #[tokio::test]
    async fn admin_sees_notes_from_every_owner() {
        let state = AppState::new(TokenCodec::new("admin-test-secret-with-at-least-32-bytes"));
        state.notes.save("alice", "a", "");
        state.notes.save("bob", "b", "");

        let admin = Auth(AuthenticatedUser {
            username: "root".into(),
            roles: [Role::Admin].into_iter().collect(),
        });
        let Json(all) = list_all_notes(State(state), admin).await;
        assert_eq!(all.len(), 2);
    }
}
