// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HMAC secret for identity tokens (at least 32 bytes) | random per process |
//! | `TOKEN_TTL_MINUTES` | Token validity window, at most one year | `30` |
//! | `ADMIN_USERNAME` | Seed an administrator account | unset |
//! | `ADMIN_PASSWORD` | Password for the seeded administrator | unset |
//! | `TLS_CERT_PATH` | PEM certificate chain; enables HTTPS with `TLS_KEY_PATH` | unset |
//! | `TLS_KEY_PATH` | PEM private key | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Duration;

use crate::auth::token::{DEFAULT_TOKEN_TTL_MINUTES, MIN_SECRET_LEN};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const TOKEN_TTL_ENV: &str = "TOKEN_TTL_MINUTES";
pub const ADMIN_USERNAME_ENV: &str = "ADMIN_USERNAME";
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Upper bound on `TOKEN_TTL_MINUTES` (one year).
pub const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be at least {1} bytes")]
    SecretTooShort(&'static str, usize),
    #[error("{var} is not valid: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("{0} and {1} must be set together")]
    Incomplete(&'static str, &'static str),
}

/// Where the signing secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    Environment,
    /// Generated at startup; tokens do not survive a restart
    Ephemeral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub jwt_secret: String,
    pub secret_source: SecretSource,
    pub token_ttl: Duration,
    pub admin: Option<AdminSeed>,
    pub tls: Option<TlsPaths>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("addr", &self.addr)
            .field("secret_source", &self.secret_source)
            .field("token_ttl", &self.token_ttl)
            .field("admin", &self.admin.as_ref().map(|a| &a.username))
            .field("tls", &self.tls)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: PORT_ENV,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };
        let addr = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                var: HOST_ENV,
                value: host,
            })?;

        let (jwt_secret, secret_source) = match lookup(JWT_SECRET_ENV) {
            Some(secret) if secret.len() < MIN_SECRET_LEN => {
                return Err(ConfigError::SecretTooShort(JWT_SECRET_ENV, MIN_SECRET_LEN))
            }
            Some(secret) => (secret, SecretSource::Environment),
            None => (ephemeral_secret(), SecretSource::Ephemeral),
        };

        let token_ttl = match lookup(TOKEN_TTL_ENV) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(minutes) if (1..=MAX_TOKEN_TTL_MINUTES).contains(&minutes) => {
                    Duration::minutes(minutes)
                }
                _ => {
                    return Err(ConfigError::Invalid {
                        var: TOKEN_TTL_ENV,
                        value: raw,
                    })
                }
            },
            None => Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        };

        let admin = match (lookup(ADMIN_USERNAME_ENV), lookup(ADMIN_PASSWORD_ENV)) {
            (Some(username), Some(password)) => Some(AdminSeed { username, password }),
            (None, None) => None,
            _ => return Err(ConfigError::Incomplete(ADMIN_USERNAME_ENV, ADMIN_PASSWORD_ENV)),
        };

        let tls = match (lookup(TLS_CERT_PATH_ENV), lookup(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::Incomplete(TLS_CERT_PATH_ENV, TLS_KEY_PATH_ENV)),
        };

        Ok(Self {
            addr,
            jwt_secret,
            secret_source,
            token_ttl,
            admin,
            tls,
        })
    }
}

fn ephemeral_secret() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.secret_source, SecretSource::Ephemeral);
        assert!(config.jwt_secret.len() >= MIN_SECRET_LEN);
        assert_eq!(config.token_ttl, Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES));
        assert!(config.admin.is_none());
        assert!(config.tls.is_none());
    }

    #[test]
    fn reads_explicit_values() {
        let secret = "s".repeat(MIN_SECRET_LEN);
        let config = load(&[
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "3000"),
            (JWT_SECRET_ENV, &secret),
            (TOKEN_TTL_ENV, "5"),
            (ADMIN_USERNAME_ENV, "root"),
            (ADMIN_PASSWORD_ENV, "hunter22"),
        ])
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.jwt_secret, secret);
        assert_eq!(config.secret_source, SecretSource::Environment);
        assert_eq!(config.token_ttl, Duration::minutes(5));
        assert_eq!(config.admin.unwrap().username, "root");
    }

    #[test]
    fn rejects_short_secret() {
        assert_eq!(
            load(&[(JWT_SECRET_ENV, "short")]),
            Err(ConfigError::SecretTooShort(JWT_SECRET_ENV, MIN_SECRET_LEN))
        );
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(matches!(
            load(&[(PORT_ENV, "eighty")]),
            Err(ConfigError::Invalid { var: PORT_ENV, .. })
        ));
        assert!(matches!(
            load(&[(TOKEN_TTL_ENV, "0")]),
            Err(ConfigError::Invalid { var: TOKEN_TTL_ENV, .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_ttl() {
        for raw in ["999999999999999", "-5", "525601"] {
            assert!(
                matches!(
                    load(&[(TOKEN_TTL_ENV, raw)]),
                    Err(ConfigError::Invalid { var: TOKEN_TTL_ENV, .. })
                ),
                "{raw} should be rejected"
            );
        }

        let config = load(&[(TOKEN_TTL_ENV, "525600")]).unwrap();
        assert_eq!(config.token_ttl, Duration::minutes(MAX_TOKEN_TTL_MINUTES));
    }

    #[test]
    fn half_configured_pairs_are_errors() {
        assert_eq!(
            load(&[(ADMIN_USERNAME_ENV, "root")]),
            Err(ConfigError::Incomplete(ADMIN_USERNAME_ENV, ADMIN_PASSWORD_ENV))
        );
        assert_eq!(
            load(&[(TLS_KEY_PATH_ENV, "/tmp/key.pem")]),
            Err(ConfigError::Incomplete(TLS_CERT_PATH_ENV, TLS_KEY_PATH_ENV))
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let secret = "x".repeat(MIN_SECRET_LEN);
        let config = load(&[(JWT_SECRET_ENV, &secret)]).unwrap();
        assert!(!format!("{config:?}").contains(&secret));
    }
}
