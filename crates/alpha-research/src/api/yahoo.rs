//! Yahoo Finance quote client
//!
//! Used to refresh the live-data override table with real closing prices.

use crate::error::{Result, ResearchError};
use crate::ticker::Ticker;
use yahoo_finance_api as yahoo;

/// Yahoo Finance API client
pub struct YahooFinanceClient {}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    /// Latest daily closing price for a ticker
    pub async fn get_close(&self, ticker: &Ticker) -> Result<f64> {
        let provider =
            yahoo::YahooConnector::new().map_err(|e| ResearchError::Yahoo(e.to_string()))?;

        let response = provider
            .get_latest_quotes(ticker.as_str(), "1d")
            .await
            .map_err(|e| ResearchError::Yahoo(e.to_string()))?;

        let quote = response
            .last_quote()
            .map_err(|e| ResearchError::Yahoo(e.to_string()))?;

        Ok(quote.close)
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_close() {
        let client = YahooFinanceClient::new();
        let close = client.get_close(&Ticker::parse("AAPL").unwrap()).await.unwrap();
        assert!(close > 0.0);
    }
}
