//! Listing search filter.

use serde::{Deserialize, Serialize};

use super::kind::PostType;
use super::model::Post;

/// Optional filters for listing search. All bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostSearch {
    /// Restrict to one listing type.
    pub post_type: Option<PostType>,
    /// Exact number of rooms.
    pub rooms_count: Option<i32>,
    /// Minimum price.
    pub price_from: Option<i64>,
    /// Maximum price.
    pub price_until: Option<i64>,
}

impl PostSearch {
    /// Whether a listing satisfies every filter that is set.
    pub fn matches(&self, post: &Post) -> bool {
        self.post_type.is_none_or(|t| post.post_type == t)
            && self.rooms_count.is_none_or(|r| post.rooms_count == r)
            && self.price_from.is_none_or(|min| post.price >= min)
            && self.price_until.is_none_or(|max| post.price <= max)
    }
}
