//! Favorites membership entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shanyrak_core::types::PostId;

/// One listing in a user's favorites set, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FavoriteEntry {
    /// The favorited listing.
    pub post_id: PostId,
    /// Address of the listing, for display.
    pub address: String,
    /// When the listing was added.
    pub added_at: DateTime<Utc>,
}
