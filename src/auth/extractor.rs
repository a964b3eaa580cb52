// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for the resolved identity.
//!
//! Use the `Auth` extractor in handlers that need the caller:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```
//!
//! The extractors only read the [`RequestContext`] left by the
//! authorization step; they never look at tokens themselves.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, AuthenticatedUser, RequestContext};

/// Extractor for authenticated users.
///
/// Rejects with `Unauthenticated` when the context is anonymous. With the
/// access policy in front of a route this is a second line of defense, so
/// a handler never runs without the identity it asked for.
pub struct Auth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .and_then(RequestContext::identity)
            .cloned()
            .map(Auth)
            .ok_or(AuthError::Unauthenticated)
    }
}
