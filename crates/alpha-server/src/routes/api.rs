//! JSON endpoints
//!
//! - `GET /api/profile/:ticker` - the stored profile
//! - `GET /api/explain/:metric` - a metric explanation
//! - `GET /api/header` - header values for live polling

use alpha_research::{Explanation, FinancialProfile, HeaderSnapshot, Ticker, metrics};
use axum::Json;
use axum::extract::{Path, State};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// `GET /api/profile/:ticker`
pub async fn profile(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> AppResult<Json<FinancialProfile>> {
    let ticker = Ticker::parse(&ticker)?;
    let dashboard = state.dashboard.lock().await;
    dashboard
        .profile(&ticker)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no profile stored for {ticker}")))
}

/// `GET /api/explain/:metric`
pub async fn explain(Path(metric): Path<String>) -> Json<Explanation> {
    Json(metrics::explain(&metric))
}

/// `GET /api/header`
pub async fn header(State(state): State<AppState>) -> Json<HeaderSnapshot> {
    Json(state.dashboard.lock().await.header())
}
