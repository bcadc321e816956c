use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;
use crate::store::migrate;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let version = migrate::get_current_version(state.store());
    let latency_us = start.elapsed().as_micros() as u64;

    Json(serde_json::json!({
        "status": if version.is_ok() { "ok" } else { "degraded" },
        "uptimeSecs": state.uptime_secs(),
        "store": {
            "healthy": version.is_ok(),
            "schemaVersion": version.ok(),
            "latestSchemaVersion": migrate::latest_version(),
            "latencyUs": latency_us,
        }
    }))
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Ready once the store answers and every migration has been applied.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match migrate::get_current_version(state.store()) {
        Ok(version) if version >= migrate::latest_version() => StatusCode::OK,
        Ok(version) => {
            tracing::warn!(version, "Store schema behind, not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(e) => {
            tracing::warn!(error = %e, "Store unreadable, not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
