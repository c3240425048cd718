//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use shanyrak_auth::jwt::{JwtDecoder, JwtEncoder};
use shanyrak_auth::password::{PasswordHasher, PasswordValidator};
use shanyrak_core::config::AppConfig;
use shanyrak_database::Stores;
use shanyrak_service::{AccountService, CommentService, ShanyrakService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// User, listing and comment stores
    pub stores: Stores,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Signup, login, profile and favorites
    pub account_service: Arc<AccountService>,
    /// Listings
    pub shanyrak_service: Arc<ShanyrakService>,
    /// Comments
    pub comment_service: Arc<CommentService>,
}

impl AppState {
    /// Wire services on top of the given stores.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&stores.users),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
            Arc::clone(&jwt_encoder),
            Arc::clone(&jwt_decoder),
        ));
        let shanyrak_service = Arc::new(ShanyrakService::new(Arc::clone(&stores.posts)));
        let comment_service = Arc::new(CommentService::new(Arc::clone(&stores.comments)));

        Self {
            config: Arc::new(config),
            stores,
            jwt_encoder,
            jwt_decoder,
            account_service,
            shanyrak_service,
            comment_service,
        }
    }
}
