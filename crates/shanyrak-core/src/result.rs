//! Convenience result type alias.

use crate::error::AppError;

/// A specialized `Result` type for Shanyrak operations.
///
/// Every crate returns `AppResult<T>` at its public boundary so errors
/// propagate with `?` without per-crate conversions.
pub type AppResult<T> = Result<T, AppError>;
