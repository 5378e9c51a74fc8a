//! Research API client
//!
//! Makes exactly one time-bounded attempt per call. Falling back to generated
//! data is the caller's decision, see [`crate::controller::Dashboard::complete_search`].

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::error::{Result, ResearchError};
use crate::model::FinancialProfile;
use crate::ticker::Ticker;

/// Anything that can produce an authoritative profile for a ticker
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the profile for `ticker`
    async fn fetch(&self, ticker: &Ticker) -> Result<FinancialProfile>;
}

/// HTTP client for `GET {endpoint}/api/research/{TICKER}`
#[derive(Debug, Clone)]
pub struct ResearchClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl ResearchClient {
    /// Create a client from the dashboard configuration
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("alpha-research/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.research_endpoint.trim_end_matches('/').to_string(),
            timeout: config.request_timeout,
        })
    }

    /// URL queried for a ticker
    pub fn profile_url(&self, ticker: &Ticker) -> String {
        format!("{}/api/research/{}", self.endpoint, ticker)
    }

    /// Timeout applied to each request
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn request(&self, ticker: &Ticker) -> Result<FinancialProfile> {
        let url = self.profile_url(ticker);
        debug!(%url, "requesting research profile");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResearchError::Status {
                ticker: ticker.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ProfileSource for ResearchClient {
    async fn fetch(&self, ticker: &Ticker) -> Result<FinancialProfile> {
        tokio::time::timeout(self.timeout, self.request(ticker))
            .await
            .unwrap_or_else(|_| {
                Err(ResearchError::Timeout {
                    ticker: ticker.to_string(),
                    after: self.timeout,
                })
            })
    }
}
