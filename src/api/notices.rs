// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Notice board endpoints.
//!
//! Every signed-in user can read the board. Posting and removing notices is
//! gated to `ADMIN` by the access policy, so these handlers only need the
//! caller's identity for logging.

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
    storage::Notice,
};

/// List all notices, newest first.
#[utoipa::path(
    get,
    path = "/notice",
    tag = "Notices",
    security(("token" = [])),
    responses(
        (status = 200, description = "All notices in descending id order", body = Vec<Notice>),
        (status = 401, description = "Missing, invalid or expired token"),
    )
)]
pub async fn list_notices(State(state): State<AppState>) -> Json<Vec<Notice>> {
    Json(state.notices.find_all())
}

/// Post a new notice.
#[utoipa::path(
    post,
    path = "/notice",
    tag = "Notices",
    request_body = CreatePostRequest,
    security(("token" = [])),
    responses(
        (status = 201, description = "Notice posted", body = Notice),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 422, description = "Blank title"),
    )
)]
pub async fn create_notice(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Notice>), ApiError> {
    request.validate().map_err(ApiError::unprocessable)?;

    let notice = state.notices.save(&request.title, &request.content);
    tracing::info!(notice_id = notice.id, author = %user.username, "notice posted");

    Ok((StatusCode::CREATED, Json(notice)))
}

/// Remove a notice. Unknown ids are not an error.
#[utoipa::path(
    delete,
    path = "/notice",
    tag = "Notices",
    params(IdQuery),
    security(("token" = [])),
    responses(
        (status = 204, description = "Notice removed or never existed"),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Caller is not an administrator"),
    )
)]
pub async fn delete_notice(
    State(state): State<AppState>,
    Auth(user): Auth,
    Query(query): Query<IdQuery>,
) -> StatusCode {
    if state.notices.delete_by_id(query.id) {
        tracing::info!(notice_id = query.id, by = %user.username, "notice removed");
    }
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthenticatedUser, Role, TokenCodec};

    fn state() -> AppState {
        AppState::new(TokenCodec::new("notices-test-secret-with-at-least-32-bytes"))
    }

    fn admin() -> Auth {
        Auth(AuthenticatedUser {
            username: "root".into(),
            roles: [Role::Admin, Role::User].into_iter().collect(),
        })
    }

    fn post(title: &str) -> Json<CreatePostRequest> {
        Json(CreatePostRequest {
            title: title.into(),
            content: "body".into(),
        })
    }

    #[tokio::test]
    async fn newest_notice_is_listed_first() {
        let state = state();
        create_notice(State(state.clone()), admin(), post("first"))
            .await
            .unwrap();
        let (status, Json(second)) = create_notice(State(state.clone()), admin(), post("second"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(all) = list_notices(State(state)).await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[0].title, "second");
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let err = create_notice(State(state()), admin(), post("   "))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let state = state();
        let (_, Json(notice)) = create_notice(State(state.clone()), admin(), post("gone soon"))
            .await
            .unwrap();

        let first = delete_notice(State(state.clone()), admin(), Query(IdQuery { id: notice.id })).await;
        let again = delete_notice(State(state.clone()), admin(), Query(IdQuery { id: notice.id })).await;
        assert_eq!(first, StatusCode::NO_CONTENT);
        assert_eq!(again, StatusCode::NO_CONTENT);

        let Json(all) = list_notices(State(state)).await;
        assert!(all.is_empty());
    }
}
