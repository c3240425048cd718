//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shanyrak_core::types::{CommentId, PostId, UserId};

/// A comment on a listing. Author and parent listing never change.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: CommentId,
    /// Comment body.
    pub content: String,
    /// When the comment was written.
    pub created_at: DateTime<Utc>,
    /// The user who wrote it.
    pub author_id: UserId,
    /// The listing it belongs to.
    pub post_id: PostId,
}

impl Comment {
    /// Whether the given user wrote this comment.
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}
