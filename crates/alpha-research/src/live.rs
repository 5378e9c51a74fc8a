//! Live-market override table
//!
//! A JSON object keyed by ticker, consulted only by the mock data generator.
//! Entries take precedence over the generator's random fallbacks:
//!
//! ```json
//! { "TSLA": { "price": 430.0, "ratios": { "marketCap": 1.4e12, "trailingPE": 98.1 } } }
//! ```
//!
//! Loading is per entry: a key that is not a valid ticker or a value that
//! does not decode is skipped with a warning, and the rest of the table is
//! kept. A `null` price or ratios object reads as unknown.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use crate::api::YahooFinanceClient;
use crate::error::Result;
use crate::ticker::Ticker;

/// Ratios carried by a live entry; each may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveRatios {
    #[serde(rename = "marketCap", default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    /// Older tables call this `pe`
    #[serde(
        rename = "trailingPE",
        alias = "pe",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub trailing_pe: Option<f64>,
    #[serde(rename = "forwardPE", default, skip_serializing_if = "Option::is_none")]
    pub forward_pe: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
}

/// Live quote for one ticker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveQuote {
    /// Zero when the quote could not be fetched
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ratios: LiveRatios,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl LiveQuote {
    /// Price if it is usable as a base price
    pub fn usable_price(&self) -> Option<f64> {
        (self.price > 0.0).then_some(self.price)
    }
}

/// Ticker-keyed live quotes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LiveMarketTable {
    entries: BTreeMap<Ticker, LiveQuote>,
}

impl<'de> Deserialize<'de> for LiveMarketTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;

        let mut table = Self::new();
        for (key, value) in raw {
            let ticker = match Ticker::parse(&key) {
                Ok(ticker) => ticker,
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping live data entry");
                    continue;
                }
            };
            match serde_json::from_value::<LiveQuote>(value) {
                Ok(quote) => table.insert(ticker, quote),
                Err(e) => warn!(%ticker, error = %e, "skipping malformed live data entry"),
            }
        }
        Ok(table)
    }
}

impl LiveMarketTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let table: Self = serde_json::from_str(&raw)?;
        info!(path = %path.display(), entries = table.len(), "loaded live market data");
        Ok(table)
    }

    /// Write the table as pretty JSON
    pub fn save_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Build a table from Yahoo Finance closing prices
    ///
    /// Ratios are left empty since the quote endpoint does not carry them.
    /// Failed tickers are kept with a zero price so the generator falls
    /// through to its other sources.
    pub async fn fetch_yahoo(client: &YahooFinanceClient, tickers: &[Ticker]) -> Self {
        let closes = futures::future::join_all(tickers.iter().map(|t| client.get_close(t))).await;

        let mut table = Self::new();
        for (ticker, close) in tickers.iter().zip(closes) {
            let entry = match close {
                Ok(price) => {
                    info!(%ticker, price, "fetched live quote");
                    LiveQuote {
                        price,
                        ratios: LiveRatios::default(),
                    }
                }
                Err(e) => {
                    warn!(%ticker, error = %e, "failed to fetch live quote");
                    LiveQuote::default()
                }
            };
            table.insert(ticker.clone(), entry);
        }
        table
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, ticker: Ticker, quote: LiveQuote) {
        self.entries.insert(ticker, quote);
    }

    /// Look up a ticker
    pub fn get(&self, ticker: &Ticker) -> Option<&LiveQuote> {
        self.entries.get(ticker)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "TSLA": {{"price": 50, "ratios": {{"marketCap": 1e9, "trailingPE": 12, "forwardPE": 11, "beta": 1.1}}}},
                "NVDA": {{"price": 0, "ratios": {{}}}}
            }}"#
        )
        .unwrap();

        let table = LiveMarketTable::from_json_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);

        let tsla = table.get(&Ticker::parse("TSLA").unwrap()).unwrap();
        assert_eq!(tsla.usable_price(), Some(50.0));
        assert_eq!(tsla.ratios.trailing_pe, Some(12.0));
        assert_eq!(tsla.ratios.beta, Some(1.1));

        let nvda = table.get(&Ticker::parse("NVDA").unwrap()).unwrap();
        assert_eq!(nvda.usable_price(), None);
    }

    #[test]
    fn test_legacy_pe_key() {
        let table: LiveMarketTable =
            serde_json::from_str(r#"{"AAPL": {"price": 235.0, "ratios": {"marketCap": 3.5e12, "pe": 36.4}}}"#)
                .unwrap();
        let aapl = table.get(&Ticker::parse("AAPL").unwrap()).unwrap();
        assert_eq!(aapl.ratios.trailing_pe, Some(36.4));
        assert_eq!(aapl.ratios.forward_pe, None);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live_data.json");

        let mut table = LiveMarketTable::new();
        table.insert(
            Ticker::parse("NKE").unwrap(),
            LiveQuote {
                price: 78.0,
                ratios: LiveRatios::default(),
            },
        );
        table.save_json_file(&path).unwrap();

        let reloaded = LiveMarketTable::from_json_file(&path).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_null_price_reads_as_unknown() {
        let table: LiveMarketTable = serde_json::from_str(
            r#"{"TSLA": {"price": null, "ratios": {}}, "NKE": {"price": 78.0, "ratios": null}, "AAPL": {"price": 276.0, "ratios": {"trailingPE": 36.4}}}"#,
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        let tsla = table.get(&Ticker::parse("TSLA").unwrap()).unwrap();
        assert_eq!(tsla.usable_price(), None);
        let nke = table.get(&Ticker::parse("NKE").unwrap()).unwrap();
        assert_eq!(nke.ratios, LiveRatios::default());
        let aapl = table.get(&Ticker::parse("AAPL").unwrap()).unwrap();
        assert_eq!(aapl.usable_price(), Some(276.0));
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let table: LiveMarketTable = serde_json::from_str(
            r#"{"^GSPC": {"price": 6000.0}, "MSFT": {"price": "n/a"}, "goog": {"price": 318.0}}"#,
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        let goog = table.get(&Ticker::parse("GOOG").unwrap()).unwrap();
        assert_eq!(goog.usable_price(), Some(318.0));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(LiveMarketTable::from_json_file("/definitely/not/here.json").is_err());
    }
}
