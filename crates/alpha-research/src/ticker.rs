//! Validated ticker symbols

use crate::error::{Result, ResearchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest symbol accepted from user input
pub const MAX_TICKER_LEN: usize = 10;

/// An upper-cased ticker symbol such as `AAPL` or `ADS.DE`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse raw user input into a ticker
    ///
    /// Input is trimmed and upper-cased. Only ASCII letters, digits, `.` and
    /// `-` are accepted.
    pub fn parse(input: &str) -> Result<Self> {
        let symbol = input.trim().to_ascii_uppercase();

        if symbol.is_empty() {
            return Err(ResearchError::InvalidTicker("empty symbol".to_string()));
        }
        if symbol.len() > MAX_TICKER_LEN {
            return Err(ResearchError::InvalidTicker(format!(
                "{symbol} is longer than {MAX_TICKER_LEN} characters"
            )));
        }
        if let Some(bad) = symbol
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '-'))
        {
            return Err(ResearchError::InvalidTicker(format!(
                "{symbol} contains '{bad}'"
            )));
        }

        Ok(Self(symbol))
    }

    /// Wrap a symbol that is already upper-case and valid
    pub(crate) fn known(symbol: &'static str) -> Self {
        debug_assert!(Self::parse(symbol).is_ok_and(|t| t.0 == symbol));
        Self(symbol.to_string())
    }

    /// The symbol as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = ResearchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = ResearchError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
