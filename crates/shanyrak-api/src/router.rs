//! Route definitions for the Shanyrak HTTP API.
//!
//! Signup, login, refresh and the health probe are mounted without the
//! session layer, so a stale cookie can never block a fresh login. Every
//! other route runs behind [`session`](crate::middleware::session::session).

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let body_limit = server.max_body_bytes;
    let timeout = Duration::from_secs(server.request_timeout_seconds);
    let cors = build_cors_layer(&server.cors);

    let session_routes = Router::new()
        .merge(user_routes())
        .merge(favorite_routes())
        .merge(shanyrak_routes())
        .merge(comment_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session::session,
        ));

    Router::new()
        .merge(auth_routes())
        .merge(health_routes())
        .merge(session_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Signup, login and explicit refresh
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/users", post(handlers::auth::signup))
        .route("/auth/users/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
}

/// The caller's own profile
fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/auth/users/me",
        get(handlers::user::me).patch(handlers::user::update_me),
    )
}

/// Favorites set of the caller
fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/auth/users/favorites/shanyraks",
            get(handlers::favorites::list),
        )
        .route(
            "/auth/users/favorites/shanyraks/{id}",
            post(handlers::favorites::add).delete(handlers::favorites::remove),
        )
}

/// Listing CRUD and search
fn shanyrak_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shanyraks",
            get(handlers::shanyrak::search).post(handlers::shanyrak::create),
        )
        .route(
            "/shanyraks/{id}",
            get(handlers::shanyrak::get)
                .patch(handlers::shanyrak::update)
                .delete(handlers::shanyrak::delete),
        )
}

/// Comments nested under a listing
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shanyraks/{id}/comments",
            get(handlers::comment::list).post(handlers::comment::create),
        )
        .route(
            "/shanyraks/{id}/comments/{comment_id}",
            patch(handlers::comment::update).delete(handlers::comment::delete),
        )
}

/// Liveness and store connectivity
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
