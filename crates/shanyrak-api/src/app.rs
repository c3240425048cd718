//! Application builder and server lifecycle.

use std::future::IntoFuture;
use std::pin::pin;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tracing::{error, info, warn};

use shanyrak_core::config::{AppConfig, StoreBackend};
use shanyrak_core::error::AppError;
use shanyrak_database::migration::run_migrations;
use shanyrak_database::{DatabasePool, Stores};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Connect the configured store, serve HTTP, and shut down gracefully.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting Shanyrak v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Stores ───────────────────────────────────────────
    let (stores, db_pool) = match config.database.backend {
        StoreBackend::Postgres => {
            let db_pool = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                run_migrations(db_pool.pool()).await?;
            }
            (Stores::postgres(db_pool.clone()), Some(db_pool))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            (Stores::in_memory(), None)
        }
    };

    // ── Step 2: Build and start HTTP server ──────────────────────
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = build_app(AppState::new(config, stores));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("Shanyrak server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .into_future();
    let mut server = pin!(server);

    // ── Step 3: Drain in-flight requests ─────────────────────────
    tokio::select! {
        result = &mut server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = shutdown_rx.changed() => {
            match tokio::time::timeout(grace, &mut server).await {
                Ok(result) => {
                    result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
                }
                Err(_) => warn!(
                    grace_seconds = grace.as_secs(),
                    "Shutdown grace period elapsed; dropping open connections"
                ),
            }
        }
    }

    if let Some(db_pool) = db_pool {
        db_pool.close().await;
    }

    info!("Shanyrak server shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
