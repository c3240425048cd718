//! Favorites management for the calling user.

use tracing::info;

use shanyrak_core::result::AppResult;
use shanyrak_core::types::PostId;
use shanyrak_entity::user::FavoriteEntry;

use super::service::AccountService;
use crate::context::RequestContext;

impl AccountService {
    /// Add a listing to the caller's favorites.
    pub async fn add_favorite(&self, ctx: &RequestContext, post_id: PostId) -> AppResult<()> {
        self.users.add_favorite(ctx.user_id, post_id).await?;
        info!(user_id = %ctx.user_id, post_id = %post_id, "Favorite added");
        Ok(())
    }

    /// Remove a listing from the caller's favorites.
    pub async fn remove_favorite(&self, ctx: &RequestContext, post_id: PostId) -> AppResult<()> {
        self.users.remove_favorite(ctx.user_id, post_id).await?;
        info!(user_id = %ctx.user_id, post_id = %post_id, "Favorite removed");
        Ok(())
    }

    /// The caller's favorites in the order they were added.
    pub async fn favorites(&self, ctx: &RequestContext) -> AppResult<Vec<FavoriteEntry>> {
        self.users.list_favorites(ctx.user_id).await
    }
}
