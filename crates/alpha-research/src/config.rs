//! Configuration for the research dashboard

use crate::error::{Result, ResearchError};
use crate::ticker::Ticker;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Research service queried before falling back to generated data
pub const DEFAULT_RESEARCH_ENDPOINT: &str = "http://localhost:5000";

/// Tickers pre-loaded into the sidebar
pub const DEFAULT_WATCHLIST: [&str; 4] = ["TSLA", "NVDA", "AAPL", "NKE"];

/// Configuration for the research dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the research service
    pub research_endpoint: String,

    /// Time allowed for one research request
    pub request_timeout: Duration,

    /// Optional live-market override table (JSON)
    pub live_data_path: Option<PathBuf>,

    /// Seed for the mock data generator; entropy when unset
    pub seed: Option<u64>,

    /// Ticker shown on start-up
    pub default_ticker: Ticker,

    /// Tickers seeded into the sidebar on start-up
    pub watchlist: Vec<Ticker>,

    /// Interval of the cosmetic price jitter
    pub jitter_interval: Duration,

    /// Host the HTTP server binds to
    pub host: String,

    /// Port the HTTP server listens on
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            research_endpoint: DEFAULT_RESEARCH_ENDPOINT.to_string(),
            request_timeout: Duration::from_millis(8000),
            live_data_path: None,
            seed: None,
            default_ticker: Ticker::known("TSLA"),
            watchlist: default_watchlist(),
            jitter_interval: Duration::from_secs(2),
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

fn default_watchlist() -> Vec<Ticker> {
    DEFAULT_WATCHLIST.into_iter().map(Ticker::known).collect()
}

impl DashboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Build a configuration from `ALPHA_*` environment variables
    ///
    /// Unset variables keep their defaults; malformed ones are errors.
    pub fn from_env() -> Result<Self> {
        DashboardConfigBuilder::default().with_env()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.research_endpoint).map_err(|e| {
            ResearchError::Config(format!(
                "research endpoint '{}' is not a valid URL: {e}",
                self.research_endpoint
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ResearchError::Config(format!(
                "research endpoint must be http(s), got '{}'",
                url.scheme()
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(ResearchError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.jitter_interval.is_zero() {
            return Err(ResearchError::Config(
                "jitter_interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for DashboardConfig
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    research_endpoint: Option<String>,
    request_timeout: Option<Duration>,
    live_data_path: Option<PathBuf>,
    seed: Option<u64>,
    default_ticker: Option<Ticker>,
    watchlist: Option<Vec<Ticker>>,
    jitter_interval: Option<Duration>,
    host: Option<String>,
    port: Option<u16>,
}

impl DashboardConfigBuilder {
    /// Set the research service base URL
    pub fn research_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.research_endpoint = Some(endpoint.into());
        self
    }

    /// Set the research request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the live-data override file
    pub fn live_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.live_data_path = Some(path.into());
        self
    }

    /// Seed the mock data generator
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the start-up ticker
    pub fn default_ticker(mut self, ticker: Ticker) -> Self {
        self.default_ticker = Some(ticker);
        self
    }

    /// Set the seeded watchlist
    pub fn watchlist(mut self, tickers: Vec<Ticker>) -> Self {
        self.watchlist = Some(tickers);
        self
    }

    /// Set the jitter interval
    pub fn jitter_interval(mut self, duration: Duration) -> Self {
        self.jitter_interval = Some(duration);
        self
    }

    /// Set the bind host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Fill unset fields from `ALPHA_*` environment variables
    pub fn with_env(mut self) -> Result<Self> {
        if let Some(endpoint) = env_var("ALPHA_RESEARCH_ENDPOINT") {
            self.research_endpoint.get_or_insert(endpoint);
        }
        if let Some(ms) = env_parse::<u64>("ALPHA_REQUEST_TIMEOUT_MS")? {
            self.request_timeout.get_or_insert(Duration::from_millis(ms));
        }
        if let Some(path) = env_var("ALPHA_LIVE_DATA") {
            self.live_data_path.get_or_insert(PathBuf::from(path));
        }
        if let Some(seed) = env_parse::<u64>("ALPHA_SEED")? {
            self.seed.get_or_insert(seed);
        }
        if let Some(ticker) = env_var("ALPHA_DEFAULT_TICKER") {
            let ticker = Ticker::parse(&ticker)?;
            self.default_ticker.get_or_insert(ticker);
        }
        if let Some(list) = env_var("ALPHA_WATCHLIST") {
            let tickers = parse_watchlist(&list)?;
            self.watchlist.get_or_insert(tickers);
        }
        if let Some(ms) = env_parse::<u64>("ALPHA_JITTER_MS")? {
            self.jitter_interval.get_or_insert(Duration::from_millis(ms));
        }
        if let Some(host) = env_var("ALPHA_HOST") {
            self.host.get_or_insert(host);
        }
        if let Some(port) = env_parse::<u16>("ALPHA_PORT")? {
            self.port.get_or_insert(port);
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashboardConfig> {
        let defaults = DashboardConfig::default();

        let config = DashboardConfig {
            research_endpoint: self.research_endpoint.unwrap_or(defaults.research_endpoint),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            live_data_path: self.live_data_path.or(defaults.live_data_path),
            seed: self.seed.or(defaults.seed),
            default_ticker: self.default_ticker.unwrap_or(defaults.default_ticker),
            watchlist: self.watchlist.unwrap_or(defaults.watchlist),
            jitter_interval: self.jitter_interval.unwrap_or(defaults.jitter_interval),
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Parse a comma-separated ticker list, skipping blanks
pub fn parse_watchlist(list: &str) -> Result<Vec<Ticker>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Ticker::parse)
        .collect()
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    env_var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ResearchError::Config(format!("{key}={raw}: {e}")))
        })
        .transpose()
}
