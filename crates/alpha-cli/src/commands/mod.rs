pub mod explain;
pub mod live_data;
pub mod render;
pub mod show;

use alpha_research::{Dashboard, DashboardConfig, ResearchClient, Ticker};
use anyhow::{Result, anyhow};

/// A bootstrapped dashboard showing `input`
///
/// Online, the ticker goes through the normal search path with its fallback.
/// Offline, it is seeded like a watchlist entry.
pub async fn open_dashboard(config: DashboardConfig, input: &str, offline: bool) -> Result<Dashboard> {
    let client = ResearchClient::new(&config)?;
    let mut dashboard = Dashboard::new(config)?;
    dashboard.bootstrap();

    if offline {
        let ticker = Ticker::parse(input)?;
        dashboard.seed_watchlist(std::slice::from_ref(&ticker));
        dashboard.switch_company(ticker);
    } else {
        dashboard
            .search(&client, input)
            .await
            .ok_or_else(|| anyhow!("'{input}' is not a valid ticker"))?;
    }

    Ok(dashboard)
}
