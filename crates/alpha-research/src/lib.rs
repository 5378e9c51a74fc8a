//! AlphaOne research dashboard core
//!
//! Everything needed to show a per-ticker research page:
//!
//! - Financial profile model shared by the research API and the generator
//! - Deterministic-seedable mock data generator with live-price overrides
//! - Research API client with a single time-bounded attempt
//! - In-memory profile store
//! - Renderer projecting a profile onto the page and its charts
//! - Cosmetic live-price jitter
//! - Metric definitions for the explanation modal
//!
//! # Architecture
//!
//! [`Dashboard`] is the session state. Searches go to a [`ProfileSource`]
//! first; when that fails the generator fills in so the dashboard never
//! shows an error page. The [`Renderer`] turns the current profile into
//! element contents and chart configs, and [`Dashboard::to_html`] produces
//! the document.
//!
//! # Example
//!
//! ```rust,ignore
//! use alpha_research::{Dashboard, DashboardConfig, ResearchClient};
//!
//! #[tokio::main]
//! async fn main() -> alpha_research::Result<()> {
//!     let config = DashboardConfig::from_env()?;
//!     let client = ResearchClient::new(&config)?;
//!
//!     let mut dashboard = Dashboard::new(config)?;
//!     dashboard.bootstrap();
//!     dashboard.search(&client, "msft").await;
//!
//!     println!("{}", dashboard.to_html(None)?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod generator;
pub mod indicators;
pub mod insights;
pub mod jitter;
pub mod live;
pub mod metrics;
pub mod model;
pub mod render;
pub mod store;
pub mod ticker;

pub use api::{ProfileSource, ResearchClient, YahooFinanceClient};
pub use config::DashboardConfig;
pub use controller::{Dashboard, HeaderSnapshot};
pub use error::{Result, ResearchError};
pub use generator::MockDataGenerator;
pub use jitter::{JitterTick, LiveJitter};
pub use live::{LiveMarketTable, LiveQuote};
pub use metrics::{Explanation, MetricDefinition};
pub use model::FinancialProfile;
pub use render::{Page, Renderer, ResearchTab, Tab};
pub use store::DataStore;
pub use ticker::Ticker;
