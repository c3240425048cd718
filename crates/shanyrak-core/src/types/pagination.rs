//! Limit/offset pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Default number of items returned when no limit is given.
pub const DEFAULT_LIMIT: u64 = 5;
/// Maximum number of items a single request may ask for.
pub const MAX_LIMIT: u64 = 100;

/// A limit/offset window into an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of items to return.
    pub limit: u64,
    /// Number of items to skip.
    pub offset: u64,
}

impl PageRequest {
    /// Create a page request, clamping the limit to `1..=MAX_LIMIT`.
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset,
        }
    }

    /// Build a page request from raw query values.
    ///
    /// Negative values are rejected rather than silently clamped; a zero
    /// limit is rejected because the window must contain at least one row.
    pub fn from_query(limit: Option<i64>, offset: Option<i64>) -> Result<Self, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT as i64);
        let offset = offset.unwrap_or(0);

        if limit < 1 {
            return Err(AppError::validation("limit must be at least 1"));
        }
        if offset < 0 {
            return Err(AppError::validation("offset must not be negative"));
        }

        Ok(Self::new(limit as u64, offset as u64))
    }

    /// The SQL `LIMIT` value.
    pub fn sql_limit(&self) -> i64 {
        self.limit as i64
    }

    /// The SQL `OFFSET` value.
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }

    /// Apply this window to an already-filtered, ordered iterator.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX))
            .take(self.limit as usize)
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// One window of results plus the total number of matches.
///
/// `total` counts every row matching the filter, independent of the
/// window, so clients can compute how many pages exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// Total number of matching items across all windows.
    pub total: u64,
    /// The items in this window.
    pub items: Vec<T>,
}

impl<T> PageResponse<T> {
    /// Create a new page response.
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { total, items }
    }

    /// Create an empty response.
    pub fn empty() -> Self {
        Self {
            total: 0,
            items: Vec::new(),
        }
    }

    /// Convert the items while keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
