// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization step.
//!
//! Turns the inbound token into a [`RequestContext`]. This step never
//! rejects a request on its own: missing, invalid or expired tokens and
//! tokens whose user has been deleted all produce an anonymous context,
//! and the access policy that runs next decides whether that is enough.

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};

use super::authenticate::{ACCESS_TOKEN_COOKIE, LOGIN_PATH};
use super::context::RequestContext;
use super::policy::path_matches;
use crate::state::AppState;

/// Authorization middleware.
///
/// Skips token resolution on the login route and on public routes; those
/// requests proceed with an anonymous context.
pub async fn authorize(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let skip = path_matches(LOGIN_PATH, path) || state.policy.is_public(request.method(), path);

    let context = match extract_token(request.headers()) {
        Some(token) if !skip => resolve_identity(&state, token),
        _ => RequestContext::anonymous(),
    };

    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Verify `token` and load its subject from the user store.
///
/// A verified token whose user no longer exists resolves to anonymous,
/// never to an identity without a backing record.
pub fn resolve_identity(state: &AppState, token: &str) -> RequestContext {
    let username = match state.tokens.verify(token) {
        Ok(username) => username,
        Err(error) => {
            tracing::debug!(%error, "token rejected, continuing anonymously");
            return RequestContext::anonymous();
        }
    };

    match state.users.find_by_username(&username) {
        Some(user) => RequestContext::authenticated(user.into()),
        None => {
            tracing::info!(%username, "token subject no longer exists, continuing anonymously");
            RequestContext::anonymous()
        }
    }
}

/// Find the token on a request.
///
/// `Authorization: Bearer` wins over the `access_token` cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    bearer_token(headers).or_else(|| cookie_value(headers, ACCESS_TOKEN_COOKIE))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{password, Role, TokenCodec};
    use crate::storage::UserRecord;
    use axum::http::HeaderValue;

    const TEST_SECRET: &str = "authorize-test-secret-with-at-least-32-bytes";

    fn state_with_alice() -> AppState {
        let state = AppState::new(TokenCodec::new(TEST_SECRET));
        let hash = password::hash_password("pw").unwrap();
        state
            .users
            .insert(UserRecord::new(
                "alice",
                hash,
                [Role::User].into_iter().collect(),
            ))
            .unwrap();
        state
    }

    #[test]
    fn extract_token_prefers_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        headers.insert(COOKIE, HeaderValue::from_static("access_token=from-cookie"));
        assert_eq!(extract_token(&headers), Some("from-header"));
    }

    #[test]
    fn extract_token_reads_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; access_token=abc.def.ghi; lang=en"),
        );
        assert_eq!(extract_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn extract_token_ignores_other_schemes_and_empty_values() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic YWxpY2U6cHc="));
        headers.insert(COOKIE, HeaderValue::from_static("access_token="));
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn valid_token_resolves_identity_from_store() {
        let state = state_with_alice();
        let token = state.tokens.issue("alice").unwrap();

        let context = resolve_identity(&state, &token);
        let user = context.identity().expect("alice is authenticated");
        assert_eq!(user.username, "alice");
        assert!(user.has_role(Role::User));
    }

    #[test]
    fn invalid_token_is_anonymous() {
        let state = state_with_alice();
        let foreign = TokenCodec::new("some-other-secret-with-at-least-32-bytes!!");
        let token = foreign.issue("alice").unwrap();

        assert!(!resolve_identity(&state, &token).is_authenticated());
        assert!(!resolve_identity(&state, "garbage").is_authenticated());
    }

    #[test]
    fn deleted_user_with_live_token_is_anonymous() {
        let state = state_with_alice();
        let token = state.tokens.issue("alice").unwrap();
        state.users.delete("alice").unwrap();

        // Token is still cryptographically valid...
        assert_eq!(state.tokens.verify(&token).unwrap(), "alice");
        // ...but no longer yields an identity.
        assert_eq!(resolve_identity(&state, &token), RequestContext::anonymous());
    }
}
