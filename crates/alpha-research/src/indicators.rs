//! Price-derived figures shown alongside a profile

use ta::Next;
use ta::indicators::SimpleMovingAverage;

use crate::error::{Result, ResearchError};
use crate::model::PricePoint;

/// Trailing simple moving average aligned with `closes`
///
/// Positions before the first full window are `None`, so a 30-point series
/// with `period = 20` yields 19 gaps followed by 11 averages.
pub fn sma_overlay(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    let mut sma =
        SimpleMovingAverage::new(period).map_err(|e| ResearchError::Indicator(e.to_string()))?;

    Ok(closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let value = sma.next(close);
            (i + 1 >= period).then_some(value)
        })
        .collect())
}

/// Change of the current price against the previous close
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DailyChange {
    pub change: f64,
    /// Percent of the previous close
    pub percent: f64,
}

impl DailyChange {
    pub fn is_negative(&self) -> bool {
        self.change < 0.0
    }

    /// Header text such as `+2.00 (2.00%)`
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "" } else { "+" };
        format!("{sign}{:.2} ({:.2}%)", self.change, self.percent)
    }
}

/// Daily change against the second-to-last close
///
/// Zero when the history has fewer than two points.
pub fn daily_change(current_price: f64, history: &[PricePoint]) -> DailyChange {
    let Some(prev) = history.len().checked_sub(2).map(|i| &history[i]) else {
        return DailyChange::default();
    };

    let change = current_price - prev.close;
    DailyChange {
        change,
        percent: change / prev.close * 100.0,
    }
}
