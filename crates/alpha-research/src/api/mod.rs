//! API clients for profile and quote providers

pub mod research;
pub mod yahoo;

pub use research::{ProfileSource, ResearchClient};
pub use yahoo::YahooFinanceClient;
