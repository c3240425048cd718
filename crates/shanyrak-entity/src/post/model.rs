//! Listing entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shanyrak_core::types::{PostId, UserId};

use super::kind::PostType;

/// A property listing. The owner is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    /// Unique listing identifier.
    pub id: PostId,
    /// Owning user.
    pub user_id: UserId,
    /// Rent or buy.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub post_type: PostType,
    /// Asking price.
    pub price: i64,
    /// Street address.
    pub address: String,
    /// Floor area in square metres.
    pub area: f64,
    /// Number of rooms.
    pub rooms_count: i32,
    /// Free-text description.
    pub description: String,
    /// When the listing was published.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Whether the given user owns this listing.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Whether every user-supplied field equals the given draft.
    pub fn same_content_as(&self, draft: &NewPost) -> bool {
        self.post_type == draft.post_type
            && self.price == draft.price
            && self.address == draft.address
            && self.area == draft.area
            && self.rooms_count == draft.rooms_count
            && self.description == draft.description
    }
}

/// A listing together with its comment count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostDetails {
    /// The listing row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub post: Post,
    /// Number of comments on the listing.
    pub total_comments: i64,
}

/// Data required to publish a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    /// Rent or buy.
    pub post_type: PostType,
    /// Asking price.
    pub price: i64,
    /// Street address.
    pub address: String,
    /// Floor area.
    pub area: f64,
    /// Number of rooms.
    pub rooms_count: i32,
    /// Description.
    pub description: String,
}

/// Partial listing update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostChanges {
    /// New type.
    pub post_type: Option<PostType>,
    /// New price.
    pub price: Option<i64>,
    /// New address.
    pub address: Option<String>,
    /// New area.
    pub area: Option<f64>,
    /// New room count.
    pub rooms_count: Option<i32>,
    /// New description.
    pub description: Option<String>,
}

impl PostChanges {
    /// Returns `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        self.post_type.is_none()
            && self.price.is_none()
            && self.address.is_none()
            && self.area.is_none()
            && self.rooms_count.is_none()
            && self.description.is_none()
    }

    /// Apply the changes to an in-memory listing.
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(post_type) = self.post_type {
            post.post_type = post_type;
        }
        if let Some(price) = self.price {
            post.price = price;
        }
        if let Some(address) = &self.address {
            post.address = address.clone();
        }
        if let Some(area) = self.area {
            post.area = area;
        }
        if let Some(rooms_count) = self.rooms_count {
            post.rooms_count = rooms_count;
        }
        if let Some(description) = &self.description {
            post.description = description.clone();
        }
    }
}
