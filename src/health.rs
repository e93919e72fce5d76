//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload containing the server
//! version, uptime, config source metadata, the downstream endpoint,
//! and cumulative relay statistics.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub config: ConfigHealth,
    pub stats: StatsResponse,
}

#[derive(Serialize, Deserialize)]
pub struct ConfigHealth {
    pub source: String,
    pub version: String,
    pub path: String,
    pub downstream: String,
    /// `None` when the downstream exchange is unbounded.
    pub timeout_ms: Option<u64>,
}

#[derive(Serialize, Deserialize)]
pub struct StatsResponse {
    pub requests_relayed: u64,
    pub requests_fallback: u64,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let loaded = &state.loaded;
    let downstream = &loaded.config.downstream;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        config: ConfigHealth {
            source: loaded.source_name.clone(),
            version: loaded.version.short().to_string(),
            path: loaded.config.server.path.clone(),
            downstream: state.backend.endpoint().to_string(),
            timeout_ms: (downstream.timeout > 0).then_some(downstream.timeout),
        },
        stats: StatsResponse {
            requests_relayed: state.stats.relayed.load(Ordering::Relaxed),
            requests_fallback: state.stats.fallback.load(Ordering::Relaxed),
        },
    })
}
