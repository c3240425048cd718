//! # shanyrak-auth
//!
//! Credential hashing and signed session tokens.
//!
//! ## Modules
//!
//! - `jwt`: access and refresh token issuing and verification, each kind
//!   signed with its own secret
//! - `password`: Argon2id password hashing and length policy

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenError, TokenKind, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
