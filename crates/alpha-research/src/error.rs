//! Error types for research dashboard operations

use std::time::Duration;
use thiserror::Error;

/// Research dashboard specific errors
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The research service did not answer in time
    #[error("Request for {ticker} timed out after {}ms", after.as_millis())]
    Timeout {
        ticker: String,
        after: Duration,
    },

    /// The research service answered with a non-success status
    #[error("Research service returned {status} for {ticker}")]
    Status {
        ticker: String,
        status: u16,
    },

    /// Payload did not match the expected profile shape
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid ticker symbol provided
    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Technical indicator calculation error
    #[error("Indicator calculation error: {0}")]
    Indicator(String),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    Yahoo(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl ResearchError {
    /// Whether this error came from talking to the research service
    ///
    /// These are the failures the dashboard recovers from by falling back to
    /// generated data.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout { .. } | Self::Status { .. } | Self::Decode(_)
        )
    }
}

/// Result type alias for research operations
pub type Result<T> = std::result::Result<T, ResearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResearchError::InvalidTicker("??".to_string());
        assert_eq!(err.to_string(), "Invalid ticker: ??");

        let err = ResearchError::Timeout {
            ticker: "AAPL".to_string(),
            after: Duration::from_millis(8000),
        };
        assert_eq!(err.to_string(), "Request for AAPL timed out after 8000ms");

        let err = ResearchError::Status {
            ticker: "TSLA".to_string(),
            status: 500,
        };
        assert_eq!(err.to_string(), "Research service returned 500 for TSLA");
    }

    #[test]
    fn test_fetch_failure_classification() {
        let timeout = ResearchError::Timeout {
            ticker: "AAPL".to_string(),
            after: Duration::from_secs(1),
        };
        assert!(timeout.is_fetch_failure());

        let decode = serde_json::from_str::<u32>("\"nope\"").map_err(ResearchError::from);
        assert!(decode.is_err_and(|e| e.is_fetch_failure()));

        assert!(!ResearchError::Config("bad".to_string()).is_fetch_failure());
        assert!(!ResearchError::InvalidTicker(String::new()).is_fetch_failure());
    }
}
