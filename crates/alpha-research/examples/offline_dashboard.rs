//! Render the dashboard for a ticker without a research service
//!
//! ```bash
//! cargo run --example offline_dashboard -- NFLX > nflx.html
//! ```

use alpha_research::{Dashboard, DashboardConfig, Tab, Ticker};
use std::env;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();

    let symbol = env::args().nth(1).unwrap_or_else(|| "NFLX".to_string());
    let ticker = Ticker::parse(&symbol)?;

    let config = DashboardConfig::builder().seed(7).build()?;
    let mut dashboard = Dashboard::new(config)?;
    dashboard.bootstrap();
    dashboard.seed_watchlist(std::slice::from_ref(&ticker));
    dashboard.switch_company(ticker);
    dashboard.switch_tab(Tab::Technicals);

    println!("{}", dashboard.to_html(None)?);
    Ok(())
}
