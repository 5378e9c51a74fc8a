//! `alpha render`

use std::path::PathBuf;

use alpha_research::DashboardConfig;
use anyhow::{Context, Result};
use tracing::info;

pub async fn execute(
    config: DashboardConfig,
    ticker: &str,
    output: Option<PathBuf>,
    offline: bool,
) -> Result<()> {
    let dashboard = super::open_dashboard(config, ticker, offline).await?;
    let html = dashboard.to_html(None)?;

    match output {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), ticker = %dashboard.current_ticker(), "wrote dashboard");
        }
        None => println!("{html}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_render_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nflx.html");
        let config = DashboardConfig::builder().seed(3).build().unwrap();

        execute(config, "nflx", Some(path.clone()), true).await.unwrap();

        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("NFLX | AlphaOne Research"));
        assert!(html.contains("priceChart"));
    }
}
