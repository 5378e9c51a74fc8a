//! Axum application builder

use axum::Router;
use axum::routing::get;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{api, health, pages};
use crate::state::AppState;

/// Create the Axum application with all routes
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        // Dashboard
        .route("/", get(pages::index))
        .route("/search", get(pages::search))
        .route("/company/:ticker", get(pages::company))
        .route("/tab/:tab", get(pages::tab))
        .route("/research/:tab", get(pages::research_tab))
        .route("/explain", get(pages::close_explanation))
        .route("/explain/:metric", get(pages::explain))
        // JSON
        .route("/api/profile/:ticker", get(api::profile))
        .route("/api/explain/:metric", get(api::explain))
        .route("/api/header", get(api::header))
        .route("/health", get(health::health))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_research::{
        Dashboard, DashboardConfig, FinancialProfile, MockDataGenerator, ProfileSource,
        ResearchError, Ticker,
    };
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Source that always fails, forcing the generated fallback
    struct Offline;

    #[async_trait]
    impl ProfileSource for Offline {
        async fn fetch(&self, ticker: &Ticker) -> alpha_research::Result<FinancialProfile> {
            Err(ResearchError::Status {
                ticker: ticker.to_string(),
                status: 503,
            })
        }
    }

    /// Source that serves generated profiles under a fixed name
    struct Named(&'static str);

    #[async_trait]
    impl ProfileSource for Named {
        async fn fetch(&self, ticker: &Ticker) -> alpha_research::Result<FinancialProfile> {
            let mut profile = MockDataGenerator::with_seed(1).generate(ticker);
            profile.company_name = Some(self.0.to_string());
            Ok(profile)
        }
    }

    fn state_with(source: Arc<dyn ProfileSource>) -> AppState {
        let config = DashboardConfig::builder().seed(42).build().unwrap();
        let mut dashboard = Dashboard::new(config).unwrap();
        dashboard.bootstrap();
        AppState::new(dashboard, source)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, location, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_renders_dashboard() {
        let app = create_app(state_with(Arc::new(Offline)));
        let (status, _, body) = get(&app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("TSLA | AlphaOne Research"));
        assert!(body.contains("/api/header"));
    }

    #[tokio::test]
    async fn test_search_redirects_and_switches() {
        let state = state_with(Arc::new(Named("Advanced Micro Devices")));
        let app = create_app(state.clone());

        let (status, location, _) = get(&app, "/search?ticker=amd").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/"));

        let dashboard = state.dashboard.lock().await;
        assert_eq!(dashboard.current_ticker().as_str(), "AMD");
        assert_eq!(dashboard.sidebar().last().unwrap().name, "Advanced Micro Devices");
    }

    #[tokio::test]
    async fn test_offline_search_falls_back() {
        let state = state_with(Arc::new(Offline));
        let app = create_app(state.clone());

        get(&app, "/search?ticker=ZZZ").await;
        let (status, _, body) = get(&app, "/api/profile/zzz").await;
        assert_eq!(status, StatusCode::OK);
        let profile: FinancialProfile = serde_json::from_str(&body).unwrap();
        assert_eq!(profile.price_history.len(), 30);
    }

    #[tokio::test]
    async fn test_empty_search_is_noop() {
        let state = state_with(Arc::new(Offline));
        let app = create_app(state.clone());

        let (status, _, _) = get(&app, "/search?ticker=").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(state.dashboard.lock().await.store().len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_profile_is_404() {
        let app = create_app(state_with(Arc::new(Offline)));
        let (status, _, body) = get(&app, "/api/profile/QQQ").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], 404);
    }

    #[tokio::test]
    async fn test_tabs_and_company_switch() {
        let state = state_with(Arc::new(Offline));
        let app = create_app(state.clone());

        get(&app, "/tab/financials").await;
        get(&app, "/research/news").await;
        get(&app, "/company/NVDA").await;
        let (status, _, _) = get(&app, "/tab/nonsense").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _, _) = get(&app, "/company/bad%20ticker").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let dashboard = state.dashboard.lock().await;
        assert_eq!(dashboard.active_tab(), alpha_research::Tab::Financials);
        assert_eq!(
            dashboard.active_research_tab(),
            alpha_research::ResearchTab::News
        );
        assert_eq!(dashboard.current_ticker().as_str(), "NVDA");
    }

    #[tokio::test]
    async fn test_explanation_modal_routes() {
        let state = state_with(Arc::new(Offline));
        let app = create_app(state.clone());

        get(&app, "/explain/Current%20Ratio").await;
        assert!(state.dashboard.lock().await.explanation().is_some());

        get(&app, "/explain").await;
        assert!(state.dashboard.lock().await.explanation().is_none());

        let (_, _, body) = get(&app, "/api/explain/ROIC").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["kind"], "known");
        assert_eq!(json["formula"], "NOPAT / Invested Capital");

        let (_, _, body) = get(&app, "/api/explain/Beta").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["kind"], "unavailable");
    }

    #[tokio::test]
    async fn test_header_and_health() {
        let app = create_app(state_with(Arc::new(Offline)));

        let (_, _, body) = get(&app, "/api/header").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["ticker"], "TSLA");
        assert_eq!(json["price"], "$427.06");

        let (status, _, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"healthy\""));
    }
}
