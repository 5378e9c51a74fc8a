//! The dashboard document and its navigation triggers
//!
//! Every trigger updates the shared dashboard and redirects back to `/`.
//!
//! # Endpoints
//!
//! - `GET /` - the dashboard
//! - `GET /search?ticker=` - search, fetching from the research service
//! - `GET /company/:ticker` - switch company from the sidebar
//! - `GET /tab/:tab`, `GET /research/:tab` - switch tab or research sub-tab
//! - `GET /explain/:metric` - open the explanation modal
//! - `GET /explain` - close it

use alpha_research::{Dashboard, ResearchTab, Tab, Ticker};
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query of the search form
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub ticker: String,
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let dashboard = state.dashboard.lock().await;
    Ok(Html(dashboard.to_html(Some(state.poll_ms()))?))
}

/// `GET /search?ticker=`
///
/// Empty or malformed input leaves the dashboard untouched.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Redirect {
    if let Some(ticker) = Dashboard::parse_search(&query.ticker) {
        info!(%ticker, "search");
        let outcome = state.source.fetch(&ticker).await;
        state.dashboard.lock().await.complete_search(ticker, outcome);
    }
    Redirect::to("/")
}

/// `GET /company/:ticker`
pub async fn company(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> AppResult<Redirect> {
    let ticker = Ticker::parse(&ticker)?;
    state.dashboard.lock().await.switch_company(ticker);
    Ok(Redirect::to("/"))
}

/// `GET /tab/:tab`
pub async fn tab(State(state): State<AppState>, Path(tab): Path<String>) -> AppResult<Redirect> {
    let tab: Tab = tab.parse().map_err(|_| AppError::NotFound(format!("tab '{tab}'")))?;
    state.dashboard.lock().await.switch_tab(tab);
    Ok(Redirect::to("/"))
}

/// `GET /research/:tab`
pub async fn research_tab(
    State(state): State<AppState>,
    Path(tab): Path<String>,
) -> AppResult<Redirect> {
    let tab: ResearchTab = tab
        .parse()
        .map_err(|_| AppError::NotFound(format!("research tab '{tab}'")))?;
    state.dashboard.lock().await.switch_research_tab(tab);
    Ok(Redirect::to("/"))
}

/// `GET /explain/:metric`
pub async fn explain(State(state): State<AppState>, Path(metric): Path<String>) -> Redirect {
    state.dashboard.lock().await.explain(&metric);
    Redirect::to("/")
}

/// `GET /explain`
pub async fn close_explanation(State(state): State<AppState>) -> Redirect {
    state.dashboard.lock().await.close_explanation();
    Redirect::to("/")
}
