//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_connected = match state.stores.health.ping().await {
        Ok(ok) => ok,
        Err(e) => {
            warn!(error = %e, "Store ping failed");
            false
        }
    };

    Json(HealthResponse {
        status: if store_connected { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.stores.health.backend().to_string(),
        store_connected,
    })
}
