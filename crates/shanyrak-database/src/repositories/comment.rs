//! Comment repository.

use async_trait::async_trait;
use sqlx::PgPool;

use shanyrak_core::error::AppError;
use shanyrak_core::result::AppResult;
use shanyrak_core::types::{CommentId, PostId, UserId};
use shanyrak_entity::Comment;

use super::{database_error, violated_constraint};
use crate::store::CommentStore;

/// Repository for the `comments` table.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock a comment under its listing and check authorship.
    async fn lock_authored(
        tx: &mut sqlx::PgConnection,
        post_id: PostId,
        comment_id: CommentId,
        actor: UserId,
    ) -> AppResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE id = $1 AND post_id = $2 FOR UPDATE",
        )
        .bind(comment_id)
        .bind(post_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(database_error("Failed to lock comment"))?
        .ok_or_else(|| AppError::not_found("Comment not found"))?;

        if !comment.is_authored_by(actor) {
            return Err(AppError::forbidden(
                "Only the author can modify this comment",
            ));
        }
        Ok(comment)
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    async fn create_comment(
        &self,
        post_id: PostId,
        author: UserId,
        content: &str,
    ) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (content, author_id, post_id) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(content)
        .bind(author)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("comments_post_id_fkey") => AppError::not_found("Shanyrak not found"),
            Some("comments_author_id_fkey") => AppError::not_found("User not found"),
            _ => database_error("Failed to create comment")(e),
        })
    }

    async fn list_comments(&self, post_id: PostId) -> AppResult<Vec<Comment>> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error("Failed to check listing"))?;

        if !exists {
            return Err(AppError::not_found("Shanyrak not found"));
        }

        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE post_id = $1 ORDER BY id ASC")
            .bind(post_id)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error("Failed to list comments"))
    }

    async fn update_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        actor: UserId,
        content: &str,
    ) -> AppResult<Comment> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to begin transaction"))?;

        Self::lock_authored(&mut tx, post_id, comment_id, actor).await?;

        let updated = sqlx::query_as::<_, Comment>(
            "UPDATE comments SET content = $2 WHERE id = $1 RETURNING *",
        )
        .bind(comment_id)
        .bind(content)
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error("Failed to update comment"))?;

        tx.commit()
            .await
            .map_err(database_error("Failed to commit comment update"))?;
        Ok(updated)
    }

    async fn delete_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        actor: UserId,
    ) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to begin transaction"))?;

        Self::lock_authored(&mut tx, post_id, comment_id, actor).await?;

        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(&mut *tx)
            .await
            .map_err(database_error("Failed to delete comment"))?;

        tx.commit()
            .await
            .map_err(database_error("Failed to commit comment delete"))
    }
}
