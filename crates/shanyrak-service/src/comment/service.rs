//! Comments on listings.

use std::sync::Arc;

use tracing::info;

use shanyrak_core::result::AppResult;
use shanyrak_core::types::{CommentId, PostId};
use shanyrak_database::store::CommentStore;
use shanyrak_entity::Comment;

use crate::context::RequestContext;

/// Comment operations. Authorship is enforced by the store.
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentStore>,
}

impl std::fmt::Debug for CommentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentService").finish_non_exhaustive()
    }
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(comments: Arc<dyn CommentStore>) -> Self {
        Self { comments }
    }

    /// Comment on a listing as the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        post_id: PostId,
        content: &str,
    ) -> AppResult<Comment> {
        let comment = self
            .comments
            .create_comment(post_id, ctx.user_id, content)
            .await?;
        info!(
            comment_id = %comment.id,
            post_id = %post_id,
            user_id = %ctx.user_id,
            "Comment created"
        );
        Ok(comment)
    }

    /// All comments of a listing, oldest first.
    pub async fn list(&self, post_id: PostId) -> AppResult<Vec<Comment>> {
        self.comments.list_comments(post_id).await
    }

    /// Edit one of the caller's comments.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        post_id: PostId,
        comment_id: CommentId,
        content: &str,
    ) -> AppResult<Comment> {
        let comment = self
            .comments
            .update_comment(post_id, comment_id, ctx.user_id, content)
            .await?;
        info!(comment_id = %comment_id, post_id = %post_id, "Comment updated");
        Ok(comment)
    }

    /// Delete one of the caller's comments.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        post_id: PostId,
        comment_id: CommentId,
    ) -> AppResult<()> {
        self.comments
            .delete_comment(post_id, comment_id, ctx.user_id)
            .await?;
        info!(comment_id = %comment_id, post_id = %post_id, "Comment deleted");
        Ok(())
    }
}
