//! User and favorites repository.

use async_trait::async_trait;
use sqlx::PgPool;

use shanyrak_core::error::AppError;
use shanyrak_core::result::AppResult;
use shanyrak_core::types::{PostId, UserId};
use shanyrak_entity::user::{FavoriteEntry, NewUser, User, UserChanges};

use super::{database_error, violated_constraint};
use crate::store::UserStore;

/// Repository for user accounts and the `favorites` join table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate uniqueness violations on `users` into conflicts.
fn map_user_write_error(username: &str, phone: &str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match violated_constraint(&e) {
        Some("users_username_key") => {
            AppError::conflict(format!("Username '{username}' is already registered"))
        }
        Some("users_phone_key") => {
            AppError::conflict(format!("Phone '{phone}' is already registered"))
        }
        _ => database_error("Failed to write user")(e),
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create_user(&self, data: &NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, phone, password_hash, name, city) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.phone)
        .bind(&data.password_hash)
        .bind(&data.name)
        .bind(&data.city)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_write_error(&data.username, &data.phone))
    }

    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error("Failed to find user by id"))
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error("Failed to find user by username"))
    }

    async fn update_user(&self, id: UserId, changes: &UserChanges) -> AppResult<User> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to begin transaction"))?;

        let mut user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(database_error("Failed to lock user"))?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if changes.is_empty() {
            return Ok(user);
        }
        changes.apply_to(&mut user);

        let updated = sqlx::query_as::<_, User>(
            "UPDATE users SET username = $2, phone = $3, password_hash = $4, name = $5, city = $6 \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&user.username)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.city)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_user_write_error(&user.username, &user.phone))?;

        tx.commit()
            .await
            .map_err(database_error("Failed to commit user update"))?;
        Ok(updated)
    }

    async fn add_favorite(&self, user_id: UserId, post_id: PostId) -> AppResult<()> {
        sqlx::query("INSERT INTO favorites (user_id, post_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match violated_constraint(&e) {
                Some("favorites_pkey") => {
                    AppError::conflict(format!("Shanyrak {post_id} is already in favorites"))
                }
                Some("favorites_post_id_fkey") => AppError::not_found("Shanyrak not found"),
                Some("favorites_user_id_fkey") => AppError::not_found("User not found"),
                _ => database_error("Failed to add favorite")(e),
            })?;

        Ok(())
    }

    async fn remove_favorite(&self, user_id: UserId, post_id: PostId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(database_error("Failed to remove favorite"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Shanyrak {post_id} is not in favorites"
            )));
        }
        Ok(())
    }

    async fn list_favorites(&self, user_id: UserId) -> AppResult<Vec<FavoriteEntry>> {
        sqlx::query_as::<_, FavoriteEntry>(
            "SELECT f.post_id, p.address, f.added_at \
             FROM favorites f JOIN posts p ON p.id = f.post_id \
             WHERE f.user_id = $1 \
             ORDER BY f.added_at ASC, f.post_id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list favorites"))
    }
}
