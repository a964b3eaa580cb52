// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Notice Board Server - Stateless JWT Authentication Service
//!
//! This crate provides a small notice board and personal note service whose
//! routes are guarded by signed, short-lived identity tokens and a
//! declarative role-based access policy.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token codec, login/logout, identity resolution and access policy
//! - `storage` - In-memory user, notice and note stores
//! - `stopwatch` - Per-request timing
//! - `server` - HTTP/HTTPS listener and graceful shutdown

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod server;
pub mod state;
pub mod stopwatch;
pub mod storage;

use auth::{password, Role, TokenCodec};
use config::{AdminSeed, AppConfig};
use state::AppState;
use storage::{StorageError, UserRecord};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to hash administrator password: {0}")]
    Hash(#[from] password::PasswordError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Build application state from configuration, seeding the administrator
/// account when one is configured.
pub fn build_state(config: &AppConfig) -> Result<AppState, SeedError> {
    let tokens = TokenCodec::new(config.jwt_secret.as_bytes()).with_ttl(config.token_ttl);
    let state = AppState::new(tokens);

    if let Some(admin) = &config.admin {
        seed_admin(&state, admin)?;
    }

    Ok(state)
}

/// Create an account holding both `ADMIN` and `USER`.
pub fn seed_admin(state: &AppState, seed: &AdminSeed) -> Result<(), SeedError> {
    let hash = password::hash_password(&seed.password)?;
    let roles = [Role::Admin, Role::User].into_iter().collect();
    state
        .users
        .insert(UserRecord::new(&seed.username, hash, roles))?;
    tracing::info!(username = %seed.username, "administrator account seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecretSource;

    fn config(admin: Option<AdminSeed>) -> AppConfig {
        AppConfig {
            addr: "127.0.0.1:0".parse().unwrap(),
            jwt_secret: "lib-test-secret-with-at-least-32-bytes!!".into(),
            secret_source: SecretSource::Environment,
            token_ttl: chrono::Duration::minutes(5),
            admin,
            tls: None,
        }
    }

    #[test]
    fn build_state_applies_token_ttl() {
        let state = build_state(&config(None)).unwrap();
        assert_eq!(state.tokens.ttl(), chrono::Duration::minutes(5));
    }

    #[test]
    fn longest_configured_ttl_builds_and_issues() {
        let config = AppConfig::from_lookup(|key| match key {
            crate::config::JWT_SECRET_ENV => Some("x".repeat(40)),
            crate::config::TOKEN_TTL_ENV => Some(crate::config::MAX_TOKEN_TTL_MINUTES.to_string()),
            _ => None,
        })
        .unwrap();

        let state = build_state(&config).unwrap();
        let token = state.tokens.issue("alice").unwrap();
        assert_eq!(state.tokens.verify(&token).unwrap(), "alice");
    }

    #[test]
    fn seeded_admin_has_both_roles() {
        let state = build_state(&config(Some(AdminSeed {
            username: "root".into(),
            password: "hunter22".into(),
        })))
        .unwrap();

        let admin = state.users.find_by_username("root").unwrap();
        assert!(admin.has_role(Role::Admin));
        assert!(admin.has_role(Role::User));
        assert!(password::verify_password("hunter22", &admin.password_hash).is_ok());
    }
}
