//! `alpha live-data`

use std::path::Path;

use alpha_research::{LiveMarketTable, Ticker, YahooFinanceClient};
use anyhow::{Context, Result};
use tracing::info;

pub async fn execute(tickers: &[String], output: &Path) -> Result<()> {
    let tickers = tickers
        .iter()
        .map(|t| Ticker::parse(t))
        .collect::<alpha_research::Result<Vec<_>>>()?;

    let client = YahooFinanceClient::new();
    let table = LiveMarketTable::fetch_yahoo(&client, &tickers).await;
    table
        .save_json_file(output)
        .with_context(|| format!("writing {}", output.display()))?;

    let priced = tickers
        .iter()
        .filter(|t| table.get(t).and_then(|q| q.usable_price()).is_some())
        .count();
    info!(path = %output.display(), priced, total = tickers.len(), "wrote live data");
    Ok(())
}
