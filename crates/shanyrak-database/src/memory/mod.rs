//! In-memory implementation of every store.
//!
//! All three stores share one [`tokio::sync::RwLock`]-guarded state so
//! cross-entity rules (cascading deletes, favorites referencing listings)
//! behave like the relational schema. Each mutation holds the write lock
//! for its whole check-then-write sequence, which makes it atomic.

mod state;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use shanyrak_core::error::AppError;
use shanyrak_core::result::AppResult;
use shanyrak_core::types::{CommentId, PageRequest, PageResponse, PostId, UserId};
use shanyrak_entity::post::{NewPost, Post, PostChanges, PostDetails, PostSearch};
use shanyrak_entity::user::{FavoriteEntry, NewUser, User, UserChanges};
use shanyrak_entity::Comment;

use self::state::State;
use crate::store::{CommentStore, PostStore, StoreHealth, UserStore};

/// Store keeping users, listings, comments and favorites in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, data: &NewUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        state.ensure_unique_identity(None, &data.username, &data.phone)?;

        let user = User {
            id: state.next_user_id(),
            username: data.username.clone(),
            phone: data.phone.clone(),
            password_hash: data.password_hash.clone(),
            name: data.name.clone(),
            city: data.city.clone(),
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn update_user(&self, id: UserId, changes: &UserChanges) -> AppResult<User> {
        let mut state = self.state.write().await;
        let mut user = state
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found("User not found"))?;

        changes.apply_to(&mut user);
        state.ensure_unique_identity(Some(id), &user.username, &user.phone)?;
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn add_favorite(&self, user_id: UserId, post_id: PostId) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user_id) {
            return Err(AppError::not_found("User not found"));
        }
        if !state.posts.contains_key(&post_id) {
            return Err(AppError::not_found("Shanyrak not found"));
        }

        let favorites = state.favorites.entry(user_id).or_default();
        if favorites.iter().any(|(id, _)| *id == post_id) {
            return Err(AppError::conflict(format!(
                "Shanyrak {post_id} is already in favorites"
            )));
        }
        favorites.push((post_id, Utc::now()));

        Ok(())
    }

    async fn remove_favorite(&self, user_id: UserId, post_id: PostId) -> AppResult<()> {
        let mut state = self.state.write().await;
        let favorites = state.favorites.entry(user_id).or_default();
        let before = favorites.len();
        favorites.retain(|(id, _)| *id != post_id);

        if favorites.len() == before {
            return Err(AppError::not_found(format!(
                "Shanyrak {post_id} is not in favorites"
            )));
        }
        Ok(())
    }

    async fn list_favorites(&self, user_id: UserId) -> AppResult<Vec<FavoriteEntry>> {
        let state = self.state.read().await;
        let Some(favorites) = state.favorites.get(&user_id) else {
            return Ok(Vec::new());
        };

        Ok(favorites
            .iter()
            .filter_map(|(post_id, added_at)| {
                state.posts.get(post_id).map(|post| FavoriteEntry {
                    post_id: *post_id,
                    address: post.address.clone(),
                    added_at: *added_at,
                })
            })
            .collect())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn create_post(&self, owner: UserId, data: &NewPost) -> AppResult<Post> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&owner) {
            return Err(AppError::not_found("User not found"));
        }
        if state
            .posts
            .values()
            .any(|p| p.is_owned_by(owner) && p.same_content_as(data))
        {
            return Err(AppError::conflict("Following post already exists"));
        }

        let post = Post {
            id: state.next_post_id(),
            user_id: owner,
            post_type: data.post_type,
            price: data.price,
            address: data.address.clone(),
            area: data.area,
            rooms_count: data.rooms_count,
            description: data.description.clone(),
            created_at: Utc::now(),
        };
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_post(&self, id: PostId) -> AppResult<Option<PostDetails>> {
        let state = self.state.read().await;
        Ok(state.posts.get(&id).map(|post| PostDetails {
            post: post.clone(),
            total_comments: state.comment_count(id),
        }))
    }

    async fn update_post(
        &self,
        id: PostId,
        actor: UserId,
        changes: &PostChanges,
    ) -> AppResult<Post> {
        let mut state = self.state.write().await;
        let post = state.owned_post_mut(id, actor)?;
        changes.apply_to(post);
        Ok(post.clone())
    }

    async fn delete_post(&self, id: PostId, actor: UserId) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.owned_post_mut(id, actor)?;

        state.posts.remove(&id);
        state.comments.retain(|_, c| c.post_id != id);
        for favorites in state.favorites.values_mut() {
            favorites.retain(|(post_id, _)| *post_id != id);
        }
        Ok(())
    }

    async fn search_posts(
        &self,
        filter: &PostSearch,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Post>> {
        let state = self.state.read().await;
        let matching: Vec<&Post> = state.posts.values().filter(|p| filter.matches(p)).collect();
        let total = matching.len() as u64;
        let items = page.apply(matching.into_iter().cloned());
        Ok(PageResponse::new(items, total))
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create_comment(
        &self,
        post_id: PostId,
        author: UserId,
        content: &str,
    ) -> AppResult<Comment> {
        let mut state = self.state.write().await;
        if !state.posts.contains_key(&post_id) {
            return Err(AppError::not_found("Shanyrak not found"));
        }
        if !state.users.contains_key(&author) {
            return Err(AppError::not_found("User not found"));
        }

        let comment = Comment {
            id: state.next_comment_id(),
            content: content.to_string(),
            created_at: Utc::now(),
            author_id: author,
            post_id,
        };
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self, post_id: PostId) -> AppResult<Vec<Comment>> {
        let state = self.state.read().await;
        if !state.posts.contains_key(&post_id) {
            return Err(AppError::not_found("Shanyrak not found"));
        }
        Ok(state
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn update_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        actor: UserId,
        content: &str,
    ) -> AppResult<Comment> {
        let mut state = self.state.write().await;
        let comment = state.authored_comment_mut(post_id, comment_id, actor)?;
        comment.content = content.to_string();
        Ok(comment.clone())
    }

    async fn delete_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        actor: UserId,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.authored_comment_mut(post_id, comment_id, actor)?;
        state.comments.remove(&comment_id);
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> AppResult<bool> {
        Ok(true)
    }
}
