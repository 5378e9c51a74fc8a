//! HTTP server for the AlphaOne research dashboard
//!
//! Serves one shared dashboard session: the rendered page, the navigation
//! triggers as redirecting GET routes, and a few JSON endpoints. A background
//! task drives the cosmetic price drift that the page polls for.

pub mod app;
pub mod error;
pub mod jitter;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use error::{AppError, AppResult};
pub use state::AppState;

use std::sync::Arc;

use alpha_research::{Dashboard, DashboardConfig, ResearchClient};
use tracing::info;

/// Build the dashboard and serve it until the process is interrupted
pub async fn serve(config: DashboardConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let interval = config.jitter_interval;
    let client = ResearchClient::new(&config)?;

    let mut dashboard = Dashboard::new(config)?;
    dashboard.bootstrap();

    let state = AppState::new(dashboard, Arc::new(client));
    let jitter = jitter::spawn_jitter(state.clone(), interval);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("dashboard listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("received Ctrl+C, shutting down");
            }
        })
        .await?;

    jitter.abort();
    Ok(())
}
