//! Publishing, reading, editing and searching listings.

use std::sync::Arc;

use tracing::info;

use shanyrak_core::error::AppError;
use shanyrak_core::result::AppResult;
use shanyrak_core::types::{PageRequest, PageResponse, PostId};
use shanyrak_database::store::PostStore;
use shanyrak_entity::post::{NewPost, Post, PostChanges, PostDetails, PostSearch};

use crate::context::RequestContext;

/// Listing operations. Ownership is enforced by the store.
#[derive(Clone)]
pub struct ShanyrakService {
    posts: Arc<dyn PostStore>,
}

impl std::fmt::Debug for ShanyrakService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShanyrakService").finish_non_exhaustive()
    }
}

impl ShanyrakService {
    /// Creates a new listing service.
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }

    /// Publish a listing owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, data: NewPost) -> AppResult<Post> {
        let post = self.posts.create_post(ctx.user_id, &data).await?;
        info!(post_id = %post.id, user_id = %ctx.user_id, "Shanyrak created");
        Ok(post)
    }

    /// A listing with its comment count.
    pub async fn get(&self, id: PostId) -> AppResult<PostDetails> {
        self.posts
            .find_post(id)
            .await?
            .ok_or_else(|| AppError::not_found("Shanyrak not found"))
    }

    /// Edit a listing the caller owns.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: PostId,
        changes: PostChanges,
    ) -> AppResult<Post> {
        let post = self.posts.update_post(id, ctx.user_id, &changes).await?;
        info!(post_id = %id, user_id = %ctx.user_id, "Shanyrak updated");
        Ok(post)
    }

    /// Delete a listing the caller owns.
    pub async fn delete(&self, ctx: &RequestContext, id: PostId) -> AppResult<()> {
        self.posts.delete_post(id, ctx.user_id).await?;
        info!(post_id = %id, user_id = %ctx.user_id, "Shanyrak deleted");
        Ok(())
    }

    /// Filtered, paginated search.
    pub async fn search(
        &self,
        filter: &PostSearch,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Post>> {
        if let (Some(from), Some(until)) = (filter.price_from, filter.price_until) {
            if from > until {
                return Ok(PageResponse::empty());
            }
        }
        self.posts.search_posts(filter, page).await
    }
}
