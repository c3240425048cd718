//! Store traits consumed by the service layer.
//!
//! Every rule that protects data integrity lives behind these traits:
//! uniqueness, existence of referenced rows, ownership of listings and
//! comments, and favorites membership. Both the sqlx repositories and the
//! in-memory store enforce the same rules and report violations with the
//! same [`ErrorKind`](shanyrak_core::error::ErrorKind).

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use shanyrak_core::result::AppResult;
use shanyrak_core::types::{CommentId, PageRequest, PageResponse, PostId, UserId};
use shanyrak_entity::post::{NewPost, Post, PostChanges, PostDetails, PostSearch};
use shanyrak_entity::user::{FavoriteEntry, NewUser, User, UserChanges};
use shanyrak_entity::Comment;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::repositories::{CommentRepository, PostRepository, UserRepository};

/// User accounts and their favorites set.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Duplicate username or phone yields `Conflict`.
    async fn create_user(&self, data: &NewUser) -> AppResult<User>;

    /// Look a user up by id.
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>>;

    /// Look a user up by login name.
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Apply a partial update. Uniqueness is re-checked.
    async fn update_user(&self, id: UserId, changes: &UserChanges) -> AppResult<User>;

    /// Add a listing to the user's favorites.
    ///
    /// Fails with `NotFound` when the listing does not exist and with
    /// `Conflict` when it is already a favorite.
    async fn add_favorite(&self, user_id: UserId, post_id: PostId) -> AppResult<()>;

    /// Remove a listing from favorites; `NotFound` if it is not a member.
    async fn remove_favorite(&self, user_id: UserId, post_id: PostId) -> AppResult<()>;

    /// Favorites in the order they were added.
    async fn list_favorites(&self, user_id: UserId) -> AppResult<Vec<FavoriteEntry>>;
}

/// Property listings.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Publish a listing for `owner`.
    ///
    /// A listing identical in every field to one the owner already has
    /// yields `Conflict`.
    async fn create_post(&self, owner: UserId, data: &NewPost) -> AppResult<Post>;

    /// A listing with its comment count.
    async fn find_post(&self, id: PostId) -> AppResult<Option<PostDetails>>;

    /// Update a listing owned by `actor`.
    async fn update_post(&self, id: PostId, actor: UserId, changes: &PostChanges)
    -> AppResult<Post>;

    /// Delete a listing owned by `actor`, cascading to its comments.
    async fn delete_post(&self, id: PostId, actor: UserId) -> AppResult<()>;

    /// Filter listings ordered by id. `total` ignores the window.
    async fn search_posts(
        &self,
        filter: &PostSearch,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Post>>;
}

/// Comments on listings.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Attach a comment to an existing listing.
    async fn create_comment(
        &self,
        post_id: PostId,
        author: UserId,
        content: &str,
    ) -> AppResult<Comment>;

    /// All comments of a listing, oldest first. `NotFound` for a missing listing.
    async fn list_comments(&self, post_id: PostId) -> AppResult<Vec<Comment>>;

    /// Edit a comment. It must belong to `post_id` and be authored by `actor`.
    async fn update_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        actor: UserId,
        content: &str,
    ) -> AppResult<Comment>;

    /// Delete a comment under the same rules as [`CommentStore::update_comment`].
    async fn delete_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        actor: UserId,
    ) -> AppResult<()>;
}

/// Liveness of the backing store.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Short backend name for diagnostics.
    fn backend(&self) -> &'static str;

    /// Returns `Ok(true)` when the store answers.
    async fn ping(&self) -> AppResult<bool>;
}

/// The full set of stores the application runs against.
#[derive(Clone)]
pub struct Stores {
    /// Users and favorites.
    pub users: Arc<dyn UserStore>,
    /// Listings.
    pub posts: Arc<dyn PostStore>,
    /// Comments.
    pub comments: Arc<dyn CommentStore>,
    /// Connectivity probe.
    pub health: Arc<dyn StoreHealth>,
}

impl Stores {
    /// Stores backed by PostgreSQL.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            posts: Arc::new(PostRepository::new(pool.clone())),
            comments: Arc::new(CommentRepository::new(pool)),
            health: Arc::new(db),
        }
    }

    /// Stores sharing one fresh in-memory state.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            posts: store.clone(),
            comments: store.clone(),
            health: store,
        }
    }
}

impl fmt::Debug for Stores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stores")
            .field("backend", &self.health.backend())
            .finish()
    }
}
