/// Health check endpoint
///
/// Provides a simple health check endpoint that verifies:
/// - The server is running
/// - The member store is reachable
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "store": "connected"
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Member store status
    pub store: String,
}

/// Health check handler
///
/// Returns service health status including store connectivity.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let store_status = match state.store.ping().await {
        Ok(()) => "connected",
        Err(err) => {
            warn!(error = %err, "Member store health check failed");
            "disconnected"
        }
    };

    Ok(Json(HealthResponse {
        status: if store_status == "connected" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store_status.to_string(),
    }))
}
