// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::{password, Auth, Role},
    error::ApiError,
    models::{SignupRequest, UserResponse},
    state::AppState,
    storage::UserRecord,
};

/// Register a new account with the `USER` role.
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Blank username or password"),
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::unprocessable(
            "username and password must not be blank",
        ));
    }

    let SignupRequest {
        username,
        password: plaintext,
    } = request;
    let hash = tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let user = UserRecord::new(&username, hash, [Role::User].into_iter().collect());

    state.users.insert(user.clone())?;
    tracing::info!(username = %user.username, "user signed up");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Get the current authenticated user's information.
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("token" = [])),
    responses(
        (status = 200, description = "User information", body = UserResponse),
        (status = 401, description = "Missing, invalid or expired token"),
    )
)]
pub async fn get_current_user(Auth(user): Auth) -> Json<UserResponse> {
    Json(user.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthenticatedUser, TokenCodec};

    fn state() -> AppState {
        AppState::new(TokenCodec::new("users-test-secret-with-at-least-32-bytes"))
    }

    fn request(username: &str, password: &str) -> Json<SignupRequest> {
        Json(SignupRequest {
            username: username.into(),
            password: password.into(),
        })
    }

    #[tokio::test]
    async fn signup_creates_user_with_hashed_password() {
        let state = state();
        let (status, Json(body)) = signup(State(state.clone()), request("alice", "pw"))
            .await
            .expect("signup succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.username, "alice");
        assert_eq!(body.roles, vec![Role::User]);

        let stored = state.users.find_by_username("alice").unwrap();
        assert_ne!(stored.password_hash, "pw");
        assert!(password::verify_password("pw", &stored.password_hash).is_ok());
    }

    #[tokio::test]
    async fn signup_rejects_taken_username() {
        let state = state();
        signup(State(state.clone()), request("alice", "pw"))
            .await
            .unwrap();
        let err = signup(State(state), request("alice", "other"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn signup_rejects_blank_fields() {
        let err = signup(State(state()), request("  ", "pw")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        let err = signup(State(state()), request("bob", "")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn current_user_echoes_identity() {
        let user = AuthenticatedUser {
            username: "alice".into(),
            roles: [Role::Admin, Role::User].into_iter().collect(),
        };
        let Json(body) = get_current_user(Auth(user)).await;
        assert_eq!(body.username, "alice");
        assert_eq!(body.roles, vec![Role::User, Role::Admin]);
    }
}
