//! Listing repository.

use async_trait::async_trait;
use sqlx::PgPool;

use shanyrak_core::error::AppError;
use shanyrak_core::result::AppResult;
use shanyrak_core::types::{PageRequest, PageResponse, PostId, UserId};
use shanyrak_entity::post::{NewPost, Post, PostChanges, PostDetails, PostSearch};

use super::database_error;
use crate::store::PostStore;

/// Filter shared by the count and page queries. Unset bounds are `NULL`.
const SEARCH_FILTER: &str = "($1::post_type IS NULL OR type = $1) \
     AND ($2::INTEGER IS NULL OR rooms_count = $2) \
     AND ($3::BIGINT IS NULL OR price >= $3) \
     AND ($4::BIGINT IS NULL OR price <= $4)";

/// Repository for the `posts` table.
#[derive(Debug, Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new listing repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock a listing row and check that `actor` owns it.
    async fn lock_owned(
        tx: &mut sqlx::PgConnection,
        id: PostId,
        actor: UserId,
    ) -> AppResult<Post> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(database_error("Failed to lock listing"))?
            .ok_or_else(|| AppError::not_found("Shanyrak not found"))?;

        if !post.is_owned_by(actor) {
            return Err(AppError::forbidden(
                "Only the owner can modify this shanyrak",
            ));
        }
        Ok(post)
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn create_post(&self, owner: UserId, data: &NewPost) -> AppResult<Post> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to begin transaction"))?;

        // Serializes concurrent creates by the same owner.
        sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(owner)
            .fetch_optional(&mut *tx)
            .await
            .map_err(database_error("Failed to lock owner"))?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let duplicate: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM posts \
             WHERE user_id = $1 AND type = $2 AND price = $3 AND address = $4 \
             AND area = $5 AND rooms_count = $6 AND description = $7)",
        )
        .bind(owner)
        .bind(data.post_type)
        .bind(data.price)
        .bind(&data.address)
        .bind(data.area)
        .bind(data.rooms_count)
        .bind(&data.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error("Failed to check for duplicate listing"))?;

        if duplicate {
            return Err(AppError::conflict("Following post already exists"));
        }

        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (user_id, type, price, address, area, rooms_count, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(owner)
        .bind(data.post_type)
        .bind(data.price)
        .bind(&data.address)
        .bind(data.area)
        .bind(data.rooms_count)
        .bind(&data.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error("Failed to create listing"))?;

        tx.commit()
            .await
            .map_err(database_error("Failed to commit listing"))?;
        Ok(post)
    }

    async fn find_post(&self, id: PostId) -> AppResult<Option<PostDetails>> {
        sqlx::query_as::<_, PostDetails>(
            "SELECT p.*, \
             (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS total_comments \
             FROM posts p WHERE p.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to find listing"))
    }

    async fn update_post(
        &self,
        id: PostId,
        actor: UserId,
        changes: &PostChanges,
    ) -> AppResult<Post> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to begin transaction"))?;

        let mut post = Self::lock_owned(&mut tx, id, actor).await?;
        if changes.is_empty() {
            return Ok(post);
        }
        changes.apply_to(&mut post);

        let updated = sqlx::query_as::<_, Post>(
            "UPDATE posts SET type = $2, price = $3, address = $4, area = $5, \
             rooms_count = $6, description = $7 \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(post.post_type)
        .bind(post.price)
        .bind(&post.address)
        .bind(post.area)
        .bind(post.rooms_count)
        .bind(&post.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error("Failed to update listing"))?;

        tx.commit()
            .await
            .map_err(database_error("Failed to commit listing update"))?;
        Ok(updated)
    }

    async fn delete_post(&self, id: PostId, actor: UserId) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to begin transaction"))?;

        Self::lock_owned(&mut tx, id, actor).await?;

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(database_error("Failed to delete listing"))?;

        tx.commit()
            .await
            .map_err(database_error("Failed to commit listing delete"))
    }

    async fn search_posts(
        &self,
        filter: &PostSearch,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Post>> {
        let count_sql = format!("SELECT COUNT(*) FROM posts WHERE {SEARCH_FILTER}");
        let page_sql =
            format!("SELECT * FROM posts WHERE {SEARCH_FILTER} ORDER BY id ASC LIMIT $5 OFFSET $6");

        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(filter.post_type)
            .bind(filter.rooms_count)
            .bind(filter.price_from)
            .bind(filter.price_until)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error("Failed to count listings"))?;

        let posts = sqlx::query_as::<_, Post>(&page_sql)
        .bind(filter.post_type)
        .bind(filter.rooms_count)
        .bind(filter.price_from)
        .bind(filter.price_until)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to search listings"))?;

        Ok(PageResponse::new(posts, total as u64))
    }
}
