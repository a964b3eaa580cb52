// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signed identity tokens.
//!
//! Tokens are HS256 JWTs carrying the username as `sub` together with
//! `iat`/`exp`. Nothing is stored server-side: a token is valid while its
//! signature matches the codec's secret and `exp` has not passed. Revocation
//! is only possible by rotating the secret or waiting out the expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default token validity in minutes.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Minimum accepted secret length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Claims embedded in an identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject - the username
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Token ID, unique per issuance
    pub jti: String,
}

/// Token verification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

/// Token issuing failure.
#[derive(Debug, thiserror::Error)]
pub enum TokenIssueError {
    #[error("failed to encode token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
    #[error("token expiry does not fit in a timestamp")]
    ExpiryOverflow,
}

/// Issues and verifies identity tokens with a single HMAC secret.
///
/// The secret is passed in explicitly; there is no process-wide key, so
/// tests can run codecs with distinct secrets side by side.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Create a codec from a shared secret.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        }
    }

    /// Override the validity window.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Validity window applied to newly issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `username`, valid from now for the configured TTL.
    pub fn issue(&self, username: &str) -> Result<String, TokenIssueError> {
        self.issue_at(username, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (Unix seconds).
    pub fn issue_at(&self, username: &str, now: i64) -> Result<String, TokenIssueError> {
        let exp = now
            .checked_add(self.ttl.num_seconds())
            .ok_or(TokenIssueError::ExpiryOverflow)?;
        let claims = TokenClaims {
            sub: username.to_string(),
            iat: now,
            exp,
            jti: uuid::Uuid::new_v4().to_string(),
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify a token and return its subject.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token against the clock value `now` (Unix seconds).
    ///
    /// Expiry is checked before the signature: an expired token reports
    /// `Expired` whoever signed it.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<String, TokenError> {
        let unverified = jsonwebtoken::dangerous::insecure_decode::<TokenClaims>(token)
            .map_err(|_| TokenError::Malformed)?;

        if now > unverified.claims.exp {
            return Err(TokenError::Expired);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let verified = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::Malformed,
            })?;

        Ok(verified.claims.sub)
    }
}
