//! Embedded schema migrations.

use sqlx::PgPool;
use tracing::info;

use shanyrak_core::error::{AppError, ErrorKind};
use shanyrak_core::result::AppResult;

/// Apply every pending migration from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Running database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations completed");
    Ok(())
}
