//! `GET /health`

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Ticker currently shown
    pub ticker: String,
    /// Profiles held in the store
    pub profiles: usize,
    pub uptime_secs: u64,
}

/// Liveness probe
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let dashboard = state.dashboard.lock().await;
    Json(HealthResponse {
        status: "healthy",
        ticker: dashboard.current_ticker().to_string(),
        profiles: dashboard.store().len(),
        uptime_secs: state.uptime_secs(),
    })
}
