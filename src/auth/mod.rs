// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless token authentication and role-gated route access, assembled as
//! an ordered middleware chain around the router.
//!
//! ## Request Flow
//!
//! 1. [`authenticate`] completes `POST /login` (issue token, set cookie) and
//!    `/logout` (clear cookie). Other requests pass through.
//! 2. [`authorize`] reads the token from `Authorization: Bearer` or the
//!    `access_token` cookie, verifies it with the [`TokenCodec`] and loads
//!    the user. The result is a [`RequestContext`] in the request
//!    extensions, anonymous when anything is missing or invalid.
//! 3. [`enforce_access`] evaluates the [`AccessPolicy`] and answers 401
//!    (no identity) or 403 (missing role) before the handler runs.
//!
//! ## Security
//!
//! - Tokens are HS256 with a server-held secret and a short expiry
//! - No server-side session or revocation list
//! - Roles are read from the user store on every request, never from the token
//! - Login failures are generic and timing-equalized

pub mod authenticate;
pub mod authorize;
pub mod context;
pub mod error;
pub mod extractor;
pub mod password;
pub mod policy;
pub mod roles;
pub mod token;

pub use authenticate::{authenticate, ACCESS_TOKEN_COOKIE, LOGIN_PATH, LOGOUT_PATH};
pub use authorize::authorize;
pub use context::{AuthenticatedUser, RequestContext};
pub use error::AuthError;
pub use extractor::Auth;
pub use policy::{enforce_access, AccessPolicy, Decision, DenyReason, MethodMatcher, Requirement};
pub use roles::{Role, Roles};
pub use token::{TokenCodec, TokenError};
