//! JWT token creation with separate access and refresh keys.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use shanyrak_core::config::AuthConfig;
use shanyrak_core::types::UserId;

use super::claims::{Claims, TokenKind};
use super::error::TokenError;

/// Signs access tokens with the access secret and refresh tokens with the
/// refresh secret.
#[derive(Clone)]
pub struct JwtEncoder {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    header: Header,
    access_ttl: chrono::Duration,
    refresh_ttl: chrono::Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("algorithm", &self.header.alg)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// A freshly issued access + refresh pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            header: Header::new(super::algorithm(config.algorithm)),
            access_ttl: ttl(config.access_ttl_minutes, chrono::Duration::try_minutes),
            refresh_ttl: ttl(config.refresh_ttl_days, chrono::Duration::try_days),
        }
    }

    /// Issue an access token for `user_id`.
    pub fn issue_access(&self, user_id: UserId) -> Result<String, TokenError> {
        let claims = Claims::new(user_id, TokenKind::Access, Utc::now(), self.access_ttl)?;
        self.sign(&claims)
    }

    /// Issue a refresh token for `user_id`.
    pub fn issue_refresh(&self, user_id: UserId) -> Result<String, TokenError> {
        let claims = Claims::new(user_id, TokenKind::Refresh, Utc::now(), self.refresh_ttl)?;
        self.sign(&claims)
    }

    /// Issue both tokens, as done on login.
    pub fn issue_pair(&self, user_id: UserId) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access(user_id)?,
            refresh_token: self.issue_refresh(user_id)?,
        })
    }

    /// Sign arbitrary claims with the key matching their kind.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let key = match claims.token_type {
            TokenKind::Access => &self.access_key,
            TokenKind::Refresh => &self.refresh_key,
        };
        encode(&self.header, claims, key).map_err(|e| TokenError::Encoding(e.to_string()))
    }
}

/// Convert a configured lifetime, saturating values chrono cannot hold.
///
/// A saturated lifetime makes issuance fail with [`TokenError::Encoding`]
/// instead of panicking.
fn ttl(value: u64, build: fn(i64) -> Option<chrono::Duration>) -> chrono::Duration {
    i64::try_from(value)
        .ok()
        .and_then(build)
        .unwrap_or(chrono::Duration::MAX)
}
