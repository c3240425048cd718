//! JWT token encoding, decoding, and claims management.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod error;

pub use claims::{Claims, TokenKind};
pub use decoder::JwtDecoder;
pub use encoder::{JwtEncoder, TokenPair};
pub use error::TokenError;

use jsonwebtoken::Algorithm;
use shanyrak_core::config::TokenAlgorithm;

/// Map the configured HMAC variant onto the `jsonwebtoken` algorithm.
pub(crate) fn algorithm(alg: TokenAlgorithm) -> Algorithm {
    match alg {
        TokenAlgorithm::HS256 => Algorithm::HS256,
        TokenAlgorithm::HS384 => Algorithm::HS384,
        TokenAlgorithm::HS512 => Algorithm::HS512,
    }
}
