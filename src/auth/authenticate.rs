// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication step (login and logout).
//!
//! ## Login
//!
//! `POST /login` with a form-encoded `username` and `password`. On success
//! a token is issued and set as the `access_token` cookie, and the client
//! is redirected to `/`. On failure the response is a generic 401 that does
//! not reveal whether the username exists.
//!
//! Hardening gap: there is no attempt counter or lockout.
//!
//! ## Logout
//!
//! Any request to `/logout` expires the cookie and redirects to `/`.
//! Tokens are stateless, so there is nothing to invalidate server-side;
//! a copied token stays valid until it expires.

use std::sync::OnceLock;

use axum::{
    extract::{FromRequest, Request, State},
    http::{
        header::{LOCATION, SET_COOKIE},
        Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Form,
};
use chrono::Duration;
use serde::Deserialize;
use utoipa::ToSchema;

use super::error::AuthError;
use super::password;
use super::policy::path_matches;
use crate::state::AppState;
use crate::storage::UserStore;

/// Login submission route.
pub const LOGIN_PATH: &str = "/login";

/// Logout route (any method).
pub const LOGOUT_PATH: &str = "/logout";

/// Cookie carrying the identity token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Where clients land after login and logout.
pub const DEFAULT_REDIRECT: &str = "/";

/// Login form fields.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Authentication middleware.
///
/// Completes login and logout requests itself; everything else passes
/// through untouched.
pub async fn authenticate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();

    if path_matches(LOGOUT_PATH, path) {
        return logout_response();
    }

    if request.method() == Method::POST && path_matches(LOGIN_PATH, path) {
        return match login(&state, request).await {
            Ok(response) => response,
            Err(error) => error.into_response(),
        };
    }

    next.run(request).await
}

async fn login(state: &AppState, request: Request) -> Result<Response, AuthError> {
    let Form(form) = Form::<LoginForm>::from_request(request, state)
        .await
        .map_err(|rejection| {
            tracing::debug!(%rejection, "unreadable login form");
            AuthError::AuthenticationFailed
        })?;

    // Argon2 runs on the blocking pool.
    let users = state.users.clone();
    let username = tokio::task::spawn_blocking(move || {
        authenticate_credentials(users.as_ref(), &form.username, &form.password)
    })
    .await
    .map_err(|e| AuthError::InternalError(e.to_string()))??;

    let token = state
        .tokens
        .issue(&username)
        .map_err(|e| AuthError::InternalError(e.to_string()))?;

    tracing::info!(%username, "login succeeded");
    Ok(login_success_response(&token, state.tokens.ttl()))
}

/// Check a credential pair against the user store.
///
/// Unknown users still pay for one hash verification, so response timing
/// does not reveal which usernames exist.
pub fn authenticate_credentials(
    users: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<String, AuthError> {
    let Some(user) = users.find_by_username(username) else {
        if let Some(hash) = dummy_hash() {
            let _ = password::verify_password(password, hash);
        }
        tracing::info!(username, "login failed");
        return Err(AuthError::AuthenticationFailed);
    };

    if let Err(error) = password::verify_password(password, &user.password_hash) {
        tracing::info!(username = %user.username, %error, "login failed");
        return Err(AuthError::AuthenticationFailed);
    }

    Ok(user.username)
}

fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| password::hash_password("timing-equalizer").ok())
        .as_deref()
}

fn login_success_response(token: &str, ttl: Duration) -> Response {
    let cookie = format!(
        "{ACCESS_TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl.num_seconds()
    );
    redirect_with_cookie(cookie)
}

fn logout_response() -> Response {
    let cookie = format!("{ACCESS_TOKEN_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    redirect_with_cookie(cookie)
}

fn redirect_with_cookie(cookie: String) -> Response {
    (
        StatusCode::FOUND,
        [
            (LOCATION, DEFAULT_REDIRECT.to_string()),
            (SET_COOKIE, cookie),
        ],
    )
        .into_response()
}
