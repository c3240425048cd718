//! Shanyrak Server: classifieds backend for property listings.
//!
//! Loads configuration, initializes logging and hands off to the API crate.

use tracing_subscriber::{EnvFilter, fmt};

use shanyrak_core::config::AppConfig;
use shanyrak_core::error::AppError;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real deployments use the environment.
    let _ = dotenvy::dotenv();

    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = shanyrak_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load layered configuration for the environment named by `SHANYRAK_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("SHANYRAK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
