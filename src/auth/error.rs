// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::policy::DenyReason;

/// Request-level outcome of the auth pipeline.
///
/// Token-level failures never surface here: an invalid token simply leaves
/// the request anonymous and the access policy decides what that means.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Login rejected. Deliberately does not say whether the username
    /// exists or the password was wrong.
    AuthenticationFailed,
    /// Route requires an identity and none was established
    Unauthenticated,
    /// Identity established but it lacks the required role
    Forbidden,
    /// Internal error (token encoding, state misconfiguration)
    InternalError(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::AuthenticationFailed => "authentication_failed",
            AuthError::Unauthenticated => "unauthenticated",
            AuthError::Forbidden => "forbidden",
            AuthError::InternalError(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::AuthenticationFailed | AuthError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DenyReason> for AuthError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::Unauthenticated => AuthError::Unauthenticated,
            DenyReason::Forbidden => AuthError::Forbidden,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::AuthenticationFailed => write!(f, "Authentication failed"),
            AuthError::Unauthenticated => write!(f, "Authentication is required"),
            AuthError::Forbidden => write!(f, "Insufficient permissions for this resource"),
            // Details stay in the logs.
            AuthError::InternalError(_) => write!(f, "Internal authentication error"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::InternalError(detail) = &self {
            tracing::error!(%detail, "auth pipeline failure");
        }
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
