//! Custom Axum extractors.
//!
//! Every extractor rejects with [`ApiError`](crate::error::ApiError), so
//! malformed input produces the same JSON error body as domain errors.

pub mod auth;
pub mod path;
pub mod validated;

pub use auth::AuthUser;
pub use path::ApiPath;
pub use validated::{ValidatedForm, ValidatedJson, ValidatedQuery};
