//! Token verification failures.

use shanyrak_core::error::AppError;
use thiserror::Error;

/// Why a token could not be issued or accepted.
///
/// Expiry is kept apart from every other failure: it is the only
/// condition that allows a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The signature is valid but `exp` has passed.
    #[error("Token has expired")]
    Expired,
    /// Bad signature, malformed token, or wrong token kind.
    #[error("Invalid token: {0}")]
    Invalid(String),
    /// Signing failed.
    #[error("Failed to encode token: {0}")]
    Encoding(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::unauthorized("Token has expired"),
            TokenError::Invalid(_) => AppError::unauthorized("Invalid token"),
            TokenError::Encoding(msg) => AppError::internal(msg),
        }
    }
}
