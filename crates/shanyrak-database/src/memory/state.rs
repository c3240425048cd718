//! Shared mutable state behind [`super::MemoryStore`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use shanyrak_core::error::AppError;
use shanyrak_core::result::AppResult;
use shanyrak_core::types::{CommentId, PostId, UserId};
use shanyrak_entity::post::Post;
use shanyrak_entity::user::User;
use shanyrak_entity::Comment;

/// Tables keyed by id; `BTreeMap` keeps id order for listings and comments.
#[derive(Debug, Default)]
pub(super) struct State {
    pub users: BTreeMap<UserId, User>,
    pub posts: BTreeMap<PostId, Post>,
    pub comments: BTreeMap<CommentId, Comment>,
    /// Per-user favorites in insertion order.
    pub favorites: BTreeMap<UserId, Vec<(PostId, DateTime<Utc>)>>,
    last_user_id: i64,
    last_post_id: i64,
    last_comment_id: i64,
}

impl State {
    pub fn next_user_id(&mut self) -> UserId {
        self.last_user_id += 1;
        UserId::new(self.last_user_id)
    }

    pub fn next_post_id(&mut self) -> PostId {
        self.last_post_id += 1;
        PostId::new(self.last_post_id)
    }

    pub fn next_comment_id(&mut self) -> CommentId {
        self.last_comment_id += 1;
        CommentId::new(self.last_comment_id)
    }

    /// Reject a username or phone already held by another user.
    pub fn ensure_unique_identity(
        &self,
        current: Option<UserId>,
        username: &str,
        phone: &str,
    ) -> AppResult<()> {
        for user in self.users.values().filter(|u| Some(u.id) != current) {
            if user.username == username {
                return Err(AppError::conflict(format!(
                    "Username '{username}' is already registered"
                )));
            }
            if user.phone == phone {
                return Err(AppError::conflict(format!(
                    "Phone '{phone}' is already registered"
                )));
            }
        }
        Ok(())
    }

    pub fn comment_count(&self, post_id: PostId) -> i64 {
        self.comments
            .values()
            .filter(|c| c.post_id == post_id)
            .count() as i64
    }

    pub fn owned_post_mut(&mut self, id: PostId, actor: UserId) -> AppResult<&mut Post> {
        let post = self
            .posts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Shanyrak not found"))?;
        if !post.is_owned_by(actor) {
            return Err(AppError::forbidden(
                "Only the owner can modify this shanyrak",
            ));
        }
        Ok(post)
    }

    pub fn authored_comment_mut(
        &mut self,
        post_id: PostId,
        comment_id: CommentId,
        actor: UserId,
    ) -> AppResult<&mut Comment> {
        let comment = self
            .comments
            .get_mut(&comment_id)
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| AppError::not_found("Comment not found"))?;
        if !comment.is_authored_by(actor) {
            return Err(AppError::forbidden(
                "Only the author can modify this comment",
            ));
        }
        Ok(comment)
    }
}
