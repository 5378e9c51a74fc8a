//! Cosmetic live-price drift
//!
//! Nudges the displayed header price and trailing P/E between full renders so
//! the dashboard looks live. Only the page is touched: the stored profile
//! keeps its values and the next render discards the drift.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::indicators::DailyChange;
use crate::render::format::{self, DANGER_COLOR, SUCCESS_COLOR};
use crate::render::{Page, change_class, ids};

/// Largest price step per tick, in dollars
pub const MAX_PRICE_STEP: f64 = 0.20;

/// Assumed ratio of the displayed price to the session open
pub const OPEN_RATIO: f64 = 1.012;

/// Chance of nudging the trailing P/E on a tick
pub const PE_NUDGE_PROBABILITY: f64 = 0.3;

/// Largest P/E step per nudge
pub const MAX_PE_STEP: f64 = 0.05;

/// What one tick changed
#[derive(Debug, Clone, PartialEq)]
pub struct JitterTick {
    pub price: f64,
    pub change: DailyChange,
    /// New trailing P/E text, when it was nudged
    pub trailing_pe: Option<String>,
}

/// Random source for the drift
#[derive(Debug, Clone)]
pub struct LiveJitter {
    rng: StdRng,
}

impl LiveJitter {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Apply one tick to the page
    ///
    /// Returns `None` when there is no readable price on the page.
    pub fn apply(&mut self, page: &mut Page) -> Option<JitterTick> {
        let current = page
            .text(ids::COMPANY_PRICE)
            .and_then(|text| text.trim().trim_start_matches('$').parse::<f64>().ok())?;

        let step = self.rng.gen_range(-MAX_PRICE_STEP..MAX_PRICE_STEP);
        let price = current + step;
        let open = price / OPEN_RATIO;
        let change = DailyChange {
            change: price - open,
            percent: (price - open) / open * 100.0,
        };

        if let Some(el) = page.element_mut(ids::COMPANY_PRICE) {
            el.set_text(format::money(price));
            el.set_style("color", if step > 0.0 { SUCCESS_COLOR } else { DANGER_COLOR });
        }
        if let Some(el) = page.element_mut(ids::COMPANY_CHANGE) {
            el.set_text(change.display());
            el.set_class(change_class(change.is_negative()));
        }

        let trailing_pe = if self.rng.gen_bool(PE_NUDGE_PROBABILITY) {
            self.nudge_trailing_pe(page)
        } else {
            None
        };

        trace!(price, ?trailing_pe, "live jitter tick");
        Some(JitterTick {
            price,
            change,
            trailing_pe,
        })
    }

    fn nudge_trailing_pe(&mut self, page: &mut Page) -> Option<String> {
        let el = page.element_mut(ids::RATIOS_GRID)?;
        let html = el.inner_html();
        let (start, end) = trailing_pe_span(&html)?;
        let current: f64 = html[start..end].trim().parse().ok()?;

        let nudged = format!(
            "{:.2}",
            current + self.rng.gen_range(-MAX_PE_STEP..MAX_PE_STEP)
        );
        el.set_html(format!("{}{}{}", &html[..start], nudged, &html[end..]));
        Some(nudged)
    }
}

impl Default for LiveJitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Displayed trailing P/E text, if the ratios grid shows one
pub fn displayed_trailing_pe(page: &Page) -> Option<String> {
    let html = page.element(ids::RATIOS_GRID)?.inner_html();
    let (start, end) = trailing_pe_span(&html)?;
    Some(html[start..end].trim().to_string())
}

/// Byte range of the trailing P/E text inside the ratios grid markup
fn trailing_pe_span(html: &str) -> Option<(usize, usize)> {
    let marker = format!("id=\"{}\">", ids::TRAILING_PE);
    let start = html.find(&marker)? + marker.len();
    let end = start + html[start..].find('<')?;
    Some((start, end))
}
