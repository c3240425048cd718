//! JWT claims carried by access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shanyrak_core::types::UserId;

use super::error::TokenError;

/// Claims payload shared by both token kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user.
    pub user_id: UserId,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Which secret signed the token.
    pub token_type: TokenKind,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived token authorizing API requests.
    Access,
    /// Long-lived token used only to mint access tokens.
    Refresh,
}

impl Claims {
    /// Build claims for `user_id` valid from `now` for `ttl`.
    ///
    /// Fails when `now + ttl` falls outside the representable time range.
    pub fn new(
        user_id: UserId,
        token_type: TokenKind,
        now: DateTime<Utc>,
        ttl: chrono::Duration,
    ) -> Result<Self, TokenError> {
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding(format!("token lifetime {ttl} is out of range")))?;
        Ok(Self {
            user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            token_type,
        })
    }
}
