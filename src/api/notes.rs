// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Personal note endpoints (`USER` role).

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreatePostRequest, IdQuery},
    state::AppState,
    storage::Note,
};

/// List the caller's notes, newest first.
#[utoipa::path(
    get,
    path = "/note",
    tag = "Notes",
    security(("token" = [])),
    responses(
        (status = 200, description = "Caller's notes", body = Vec<Note>),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Caller lacks the USER role"),
    )
)]
pub async fn list_notes(State(state): State<AppState>, Auth(user): Auth) -> Json<Vec<Note>> {
    Json(state.notes.find_by_owner(&user.username))
}

/// Write a note owned by the caller.
#[utoipa::path(
    post,
    path = "/note",
    tag = "Notes",
    request_body = CreatePostRequest,
    security(("token" = [])),
    responses(
        (status = 201, description = "Note saved", body = Note),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Caller lacks the USER role"),
        (status = 422, description = "Blank title"),
    )
)]
pub async fn create_note(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    request.validate().map_err(ApiError::unprocessable)?;
    let note = state
        .notes
        .save(&user.username, &request.title, &request.content);
    Ok((StatusCode::CREATED, Json(note)))
}

/// Delete one of the caller's notes.
///
/// Another user's note is reported as missing.
#[utoipa::path(
    delete,
    path = "/note",
    tag = "Notes",
    params(IdQuery),
    security(("token" = [])),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Caller lacks the USER role"),
        (status = 404, description = "No such note for this user"),
    )
)]
pub async fn delete_note(
    State(state): State<AppState>,
    Auth(user): Auth,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode, ApiError> {
    state.notes.delete_owned(&user.username, query.id)?;
    Ok(StatusCode::NO_CONTENT)
}
