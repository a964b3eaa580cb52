// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Route access policy.
//!
//! An ordered list of `(method, path patterns) -> requirement` entries.
//! The first entry matching the request decides; later entries are never
//! consulted, so specific rules must come before catch-alls.
//!
//! Patterns are Ant-style:
//!
//! | Pattern | Matches |
//! |---------|---------|
//! | `/note` | exactly `/note` (a trailing slash is ignored) |
//! | `/css/*.css` | one segment, `*` inside a segment matches any run of characters |
//! | `/css/**` | `/css` and anything below it |

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::context::RequestContext;
use super::error::AuthError;
use super::roles::{Role, Roles};
use crate::state::AppState;

/// Which request methods an entry applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodMatcher {
    Any,
    Exact(Method),
}

impl MethodMatcher {
    fn matches(&self, method: &Method) -> bool {
        match self {
            MethodMatcher::Any => true,
            MethodMatcher::Exact(expected) => expected == method,
        }
    }
}

/// What a caller needs to pass an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Anyone, including anonymous callers
    Public,
    /// Any resolved identity
    Authenticated,
    /// An identity holding at least one of these roles
    AnyRole(Roles),
}

impl Requirement {
    pub fn role(role: Role) -> Self {
        Requirement::AnyRole([role].into_iter().collect())
    }

    /// Check this requirement against the request context.
    pub fn check(&self, context: &RequestContext) -> Decision {
        match (self, context.identity()) {
            (Requirement::Public, _) => Decision::Allow,
            (_, None) => Decision::Deny(DenyReason::Unauthenticated),
            (Requirement::Authenticated, Some(_)) => Decision::Allow,
            (Requirement::AnyRole(roles), Some(user)) if user.has_any_role(roles) => {
                Decision::Allow
            }
            (Requirement::AnyRole(_), Some(_)) => Decision::Deny(DenyReason::Forbidden),
        }
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No identity, and the route needs one (401)
    Unauthenticated,
    /// Identity present but lacking the required role (403)
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

/// One row of the policy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyEntry {
    pub method: MethodMatcher,
    pub patterns: Vec<String>,
    pub requirement: Requirement,
}

impl PolicyEntry {
    pub fn new<I, P>(method: MethodMatcher, patterns: I, requirement: Requirement) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            method,
            patterns: patterns.into_iter().map(Into::into).collect(),
            requirement,
        }
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.matches(method)
            && self
                .patterns
                .iter()
                .any(|pattern| path_matches(pattern, path))
    }
}

/// Ordered, first-match-wins access table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    entries: Vec<PolicyEntry>,
}

impl AccessPolicy {
    /// Empty policy: every request is denied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry after the existing ones.
    pub fn entry(mut self, entry: PolicyEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn permit_all<I, P>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.entry(PolicyEntry::new(
            MethodMatcher::Any,
            patterns,
            Requirement::Public,
        ))
    }

    pub fn require_role(self, method: MethodMatcher, pattern: &str, role: Role) -> Self {
        self.entry(PolicyEntry::new(method, [pattern], Requirement::role(role)))
    }

    /// Catch-all: every remaining request needs an identity.
    pub fn any_request_authenticated(self) -> Self {
        self.entry(PolicyEntry::new(
            MethodMatcher::Any,
            ["/**"],
            Requirement::Authenticated,
        ))
    }

    /// The notice board route table.
    pub fn notice_board() -> Self {
        Self::new()
            .permit_all(["/", "/home", "/signup", "/login"])
            .permit_all([
                "/css/**",
                "/js/**",
                "/images/**",
                "/webjars/**",
                "/favicon.ico",
            ])
            .permit_all(["/health", "/docs/**", "/api-doc/**"])
            .require_role(MethodMatcher::Any, "/note", Role::User)
            .require_role(MethodMatcher::Any, "/admin", Role::Admin)
            .require_role(MethodMatcher::Exact(Method::POST), "/notice", Role::Admin)
            .require_role(MethodMatcher::Exact(Method::DELETE), "/notice", Role::Admin)
            .any_request_authenticated()
    }

    /// First entry matching the request, if any.
    pub fn matching_entry(&self, method: &Method, path: &str) -> Option<&PolicyEntry> {
        self.entries
            .iter()
            .find(|entry| entry.matches(method, path))
    }

    /// Whether the deciding entry for this request is `Public`.
    pub fn is_public(&self, method: &Method, path: &str) -> bool {
        matches!(
            self.matching_entry(method, path),
            Some(PolicyEntry {
                requirement: Requirement::Public,
                ..
            })
        )
    }

    /// Decide whether `context` may access `method path`.
    ///
    /// Requests matching no entry are denied: anonymous callers as
    /// `Unauthenticated`, identified callers as `Forbidden`.
    pub fn evaluate(&self, method: &Method, path: &str, context: &RequestContext) -> Decision {
        match self.matching_entry(method, path) {
            Some(entry) => entry.requirement.check(context),
            None if context.is_authenticated() => Decision::Deny(DenyReason::Forbidden),
            None => Decision::Deny(DenyReason::Unauthenticated),
        }
    }
}

/// Access policy middleware.
///
/// Runs after the authorization step and rejects the request with 401/403
/// before it reaches a handler.
pub async fn enforce_access(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let decision = {
        let context = request
            .extensions()
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default();
        state
            .policy
            .evaluate(request.method(), request.uri().path(), &context)
    };

    match decision {
        Decision::Allow => next.run(request).await,
        Decision::Deny(reason) => {
            tracing::debug!(
                method = %request.method(),
                path = request.uri().path(),
                ?reason,
                "access denied"
            );
            AuthError::from(reason).into_response()
        }
    }
}

/// Match a request path against an Ant-style pattern.
pub fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = trim_trailing_slash(pattern).split('/').collect();
    let path: Vec<&str> = trim_trailing_slash(path).split('/').collect();
    match_segments(&pattern, &path)
}

fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => (0..=path.len()).any(|skip| match_segments(rest, &path[skip..])),
        Some((segment, rest)) => match path.split_first() {
            Some((head, tail)) => {
                segment_matches(segment, head) && match_segments(rest, tail)
            }
            None => false,
        },
    }
}

fn segment_matches(pattern: &str, segment: &str) -> bool {
    if pattern.contains('*') {
        wildcard_match(pattern, segment)
    } else {
        pattern == segment
    }
}

/// Glob match where `*` matches any run of bytes.
fn wildcard_match(pattern: &str, value: &str) -> bool {
    let (pattern, value) = (pattern.as_bytes(), value.as_bytes());
    let (mut p_idx, mut v_idx) = (0usize, 0usize);
    let (mut star_idx, mut match_idx) = (None, 0usize);

    while v_idx < value.len() {
        if p_idx < pattern.len() && pattern[p_idx] == b'*' {
            star_idx = Some(p_idx);
            match_idx = v_idx;
            p_idx += 1;
        } else if p_idx < pattern.len() && pattern[p_idx] == value[v_idx] {
            p_idx += 1;
            v_idx += 1;
        } else if let Some(star) = star_idx {
            p_idx = star + 1;
            match_idx += 1;
            v_idx = match_idx;
        } else {
            return false;
        }
    }

    pattern[p_idx..].iter().all(|&b| b == b'*')
}
