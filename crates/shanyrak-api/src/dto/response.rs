//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shanyrak_core::types::{CommentId, PageResponse, PostId, UserId};
use shanyrak_entity::comment::Comment;
use shanyrak_entity::post::{Post, PostDetails, PostType};
use shanyrak_entity::user::{FavoriteEntry, User};

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Phone.
    pub phone: String,
    /// Display name.
    pub name: String,
    /// City.
    pub city: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            phone: user.phone,
            name: user.name,
            city: user.city,
        }
    }
}

/// Access token issued by login or refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

impl TokenResponse {
    /// Wrap an access token.
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Identifier of a newly created resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdResponse<T> {
    /// ID.
    pub id: T,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Build from any string-like message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A listing with its comment count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShanyrakResponse {
    /// Listing ID.
    pub id: PostId,
    /// Rent or buy.
    #[serde(rename = "type")]
    pub post_type: PostType,
    /// Price.
    pub price: i64,
    /// Address.
    pub address: String,
    /// Area.
    pub area: f64,
    /// Rooms.
    pub rooms_count: i32,
    /// Description.
    pub description: String,
    /// Owner.
    pub user_id: UserId,
    /// Number of comments.
    pub total_comments: i64,
}

impl From<PostDetails> for ShanyrakResponse {
    fn from(details: PostDetails) -> Self {
        let post = details.post;
        Self {
            id: post.id,
            post_type: post.post_type,
            price: post.price,
            address: post.address,
            area: post.area,
            rooms_count: post.rooms_count,
            description: post.description,
            user_id: post.user_id,
            total_comments: details.total_comments,
        }
    }
}

/// Search result row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    /// Listing ID.
    pub id: PostId,
    /// Rent or buy.
    #[serde(rename = "type")]
    pub post_type: PostType,
    /// Price.
    pub price: i64,
    /// Address.
    pub address: String,
    /// Area.
    pub area: f64,
    /// Rooms.
    pub rooms_count: i32,
}

impl From<Post> for SearchItem {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            post_type: post.post_type,
            price: post.price,
            address: post.address,
            area: post.area,
            rooms_count: post.rooms_count,
        }
    }
}

/// One search window plus the total match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matches across all windows.
    pub total: u64,
    /// Listings in this window.
    pub objects: Vec<SearchItem>,
}

impl From<PageResponse<Post>> for SearchResponse {
    fn from(page: PageResponse<Post>) -> Self {
        let page = page.map(SearchItem::from);
        Self {
            total: page.total,
            objects: page.items,
        }
    }
}

/// Favorite listing summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteItem {
    /// Listing ID.
    pub id: PostId,
    /// Address.
    pub address: String,
}

/// The caller's favorites, in the order they were added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesResponse {
    /// Favorited listings.
    pub shanyraks: Vec<FavoriteItem>,
}

impl From<Vec<FavoriteEntry>> for FavoritesResponse {
    fn from(entries: Vec<FavoriteEntry>) -> Self {
        Self {
            shanyraks: entries
                .into_iter()
                .map(|e| FavoriteItem {
                    id: e.post_id,
                    address: e.address,
                })
                .collect(),
        }
    }
}

/// A single comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    /// Comment ID.
    pub id: CommentId,
    /// Text.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Author.
    pub author_id: UserId,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            created_at: comment.created_at,
            author_id: comment.author_id,
        }
    }
}

/// All comments of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentListResponse {
    /// Comments, oldest first.
    pub comments: Vec<CommentResponse>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Store backend name.
    pub store: String,
    /// Whether the store answered a ping.
    pub store_connected: bool,
}
