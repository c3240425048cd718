//! JWT token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{DecodingKey, Validation, decode};

use shanyrak_core::config::AuthConfig;
use shanyrak_core::types::UserId;

use super::claims::{Claims, TokenKind};
use super::error::TokenError;

/// Verifies tokens against the secret of the expected kind.
#[derive(Clone)]
pub struct JwtDecoder {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(super::algorithm(config.algorithm));
        validation.validate_exp = true;
        // Expiry is a hard boundary.
        validation.leeway = 0;

        Self {
            access_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
        }
    }

    /// Verify an access token and return its user.
    pub fn verify_access(&self, token: &str) -> Result<UserId, TokenError> {
        self.decode_kind(token, TokenKind::Access)
            .map(|claims| claims.user_id)
    }

    /// Verify a refresh token and return its user.
    pub fn verify_refresh(&self, token: &str) -> Result<UserId, TokenError> {
        self.decode_kind(token, TokenKind::Refresh)
            .map(|claims| claims.user_id)
    }

    /// Decode a token of the given kind, returning the full claims.
    pub fn decode_kind(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let key = match kind {
            TokenKind::Access => &self.access_key,
            TokenKind::Refresh => &self.refresh_key,
        };

        let claims = decode::<Claims>(token, key, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                JwtErrorKind::InvalidSignature => TokenError::Invalid("bad signature".into()),
                _ => TokenError::Invalid(e.to_string()),
            })?
            .claims;

        if claims.token_type != kind {
            return Err(TokenError::Invalid(format!(
                "expected {kind:?} token, got {:?}",
                claims.token_type
            )));
        }
        Ok(claims)
    }
}
