//! Procedural profile generator
//!
//! Synthesizes a complete [`FinancialProfile`] for any ticker from bounded
//! random draws. Used whenever the research service cannot answer and a
//! ticker has no stored record yet.

use chrono::{Datelike, Days, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::live::LiveMarketTable;
use crate::model::{
    Dcf, DcfAssumptions, DeepQualitative, DeepResearch, DeepTechnicals, FinancialProfile,
    IndicatorRow, KeyLevels, Management, ManagementDeepDive, Moat, Multiples, NewsItem, Pestel,
    Porters, PricePoint, Qualitative, RatioRow, RatioTables, Ratios, Sentiment, Swot, Technicals,
    Valuation, YearlyFinancials,
};
use crate::ticker::Ticker;

/// Recent closing prices used when no live quote is available
pub const REAL_PRICES: [(&str, f64); 8] = [
    ("TSLA", 427.06),
    ("AAPL", 276.25),
    ("NVDA", 177.41),
    ("MSFT", 490.48),
    ("GOOG", 317.99),
    ("AMZN", 231.42),
    ("META", 641.29),
    ("NFLX", 890.00),
];

/// Number of daily closes in a generated price history
pub const HISTORY_DAYS: u64 = 30;

/// Number of fiscal years in a generated income summary
pub const FINANCIAL_YEARS: i32 = 4;

/// Look up the hardcoded realistic price for a ticker
pub fn real_price(ticker: &Ticker) -> Option<f64> {
    REAL_PRICES
        .iter()
        .find(|(symbol, _)| *symbol == ticker.as_str())
        .map(|(_, price)| *price)
}

/// Random profile factory
///
/// The random source is owned by the generator, so a seeded generator
/// produces the same sequence of profiles for the same sequence of calls.
#[derive(Debug, Clone)]
pub struct MockDataGenerator {
    rng: StdRng,
    live: LiveMarketTable,
}

impl MockDataGenerator {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            live: LiveMarketTable::new(),
        }
    }

    /// Deterministic generator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            live: LiveMarketTable::new(),
        }
    }

    /// Use `live` as the override table
    pub fn with_live_data(mut self, live: LiveMarketTable) -> Self {
        self.live = live;
        self
    }

    /// The override table in use
    pub fn live_data(&self) -> &LiveMarketTable {
        &self.live
    }

    /// Generate a profile dated today (UTC)
    pub fn generate(&mut self, ticker: &Ticker) -> FinancialProfile {
        self.generate_on(ticker, Utc::now().date_naive())
    }

    /// Generate a profile whose price history ends on `today`
    pub fn generate_on(&mut self, ticker: &Ticker, today: NaiveDate) -> FinancialProfile {
        let live = self.live.get(ticker).cloned();
        let live_ratios = live.as_ref().map(|q| q.ratios.clone()).unwrap_or_default();

        // The uniform draw is made even when a known price wins
        let random_price = self.rng.gen_range(100.0..1000.0);
        let price = live
            .as_ref()
            .and_then(|q| q.usable_price())
            .or_else(|| real_price(ticker))
            .unwrap_or(random_price);

        let ratios = Ratios {
            market_cap: Some(or_draw(live_ratios.market_cap, || {
                self.rng.gen_range(100.0..2100.0) * 1e9
            })),
            trailing_pe: Some(or_draw(live_ratios.trailing_pe, || {
                self.rng.gen_range(10.0..60.0)
            })),
            forward_pe: Some(or_draw(live_ratios.forward_pe, || {
                self.rng.gen_range(10.0..50.0)
            })),
            beta: Some(or_draw(live_ratios.beta, || self.rng.gen_range(0.5..2.0))),
        };

        let financials = (0..FINANCIAL_YEARS)
            .map(|i| YearlyFinancials {
                year: today.year() - 1 - i,
                revenue: self.rng.gen_range(50.0..150.0) * 1e9,
                net_income: self.rng.gen_range(5.0..25.0) * 1e9,
            })
            .collect();

        let technicals = self.technicals(price);
        let price_history = self.price_history(price, today);
        let qualitative = Qualitative {
            moat: Moat {
                score: 70 + self.rng.gen_range(0..25),
                details: strings(&["Strong Brand", "Network Effects"]),
            },
            management: Management {
                score: 70 + self.rng.gen_range(0..25),
                details: "Experienced leadership team.".to_string(),
            },
            sentiment: Sentiment {
                score: 50 + self.rng.gen_range(0..40),
                label: "Neutral".to_string(),
                details: "Market is waiting for next earnings.".to_string(),
            },
            financial_analysis: None,
            deep_research: Some(self.deep_research(ticker, price)),
        };

        FinancialProfile {
            company_name: None,
            financials,
            ratios,
            technicals,
            price_history,
            qualitative,
        }
    }

    fn technicals(&mut self, price: f64) -> Technicals {
        Technicals {
            current_price: price,
            sma50: price * self.rng.gen_range(0.9..1.1),
            sma200: price * self.rng.gen_range(0.8..1.2),
            rsi: self.rng.gen_range(30.0..70.0),
            macd: self.rng.gen_range(-2.5..2.5),
            bb_upper: price * 1.1,
            bb_lower: price * 0.9,
            summary: if self.rng.gen_bool(0.5) {
                "Bullish Trend"
            } else {
                "Consolidation"
            }
            .to_string(),
            key_levels: KeyLevels {
                support: vec![(price * 0.9).floor(), (price * 0.85).floor()],
                resistance: vec![(price * 1.1).floor(), (price * 1.15).floor()],
            },
            indicators: vec![
                indicator(
                    "RSI (14)",
                    format!("{:.1}", self.rng.gen_range(30.0..70.0)),
                    "Neutral",
                ),
                indicator("MACD", "0.5".to_string(), "Buy"),
            ],
        }
    }

    /// Independent noise around `price`, oldest first, ending on `today`
    fn price_history(&mut self, price: f64, today: NaiveDate) -> Vec<PricePoint> {
        (0..HISTORY_DAYS)
            .map(|i| PricePoint {
                date: today - Days::new(HISTORY_DAYS - 1 - i),
                close: price * (1.0 + self.rng.gen_range(-0.05..0.05)),
            })
            .collect()
    }

    fn deep_research(&mut self, ticker: &Ticker, price: f64) -> DeepResearch {
        let rng = &mut self.rng;
        let ratios = RatioTables {
            liquidity: vec![
                ratio_row(
                    "Current Ratio",
                    format!("{:.1}", rng.gen_range(1.0..2.0)),
                    "1.2",
                    "Healthy",
                    "Sufficient liquidity.",
                ),
                ratio_row(
                    "Quick Ratio",
                    format!("{:.1}", rng.gen_range(0.8..1.8)),
                    "0.9",
                    "Healthy",
                    "Good acid-test results.",
                ),
            ],
            solvency: vec![
                ratio_row(
                    "Debt-to-Equity",
                    format!("{:.2}", rng.gen_range(0.0..1.0)),
                    "0.6",
                    "Good",
                    "Manageable leverage.",
                ),
                ratio_row(
                    "Interest Coverage",
                    format!("{:.1}", rng.gen_range(5.0..15.0)),
                    "8.0",
                    "Excellent",
                    "No default risk.",
                ),
            ],
            profitability: vec![
                ratio_row(
                    "Gross Margin",
                    format!("{:.1}%", rng.gen_range(20.0..60.0)),
                    "30%",
                    "Good",
                    "Healthy margins.",
                ),
                ratio_row(
                    "Net Margin",
                    format!("{:.1}%", rng.gen_range(10.0..30.0)),
                    "15%",
                    "Good",
                    "Profitable operations.",
                ),
            ],
            efficiency: vec![
                ratio_row(
                    "Inventory Turnover",
                    format!("{:.1}", rng.gen_range(4.0..8.0)),
                    "5.0",
                    "Neutral",
                    "Standard efficiency.",
                ),
                ratio_row(
                    "ROIC",
                    format!("{:.1}%", rng.gen_range(10.0..25.0)),
                    "12%",
                    "Good",
                    "Value creating.",
                ),
            ],
        };

        DeepResearch {
            ratios,
            qualitative: DeepQualitative {
                swot: Swot {
                    strengths: strings(&["Market Leader", "Innovation"]),
                    weaknesses: strings(&["High Costs", "Competition"]),
                    opportunities: strings(&["Global Expansion", "New Products"]),
                    threats: strings(&["Regulation", "Economic Downturn"]),
                },
                pestel: Pestel {
                    political: "Stable".to_string(),
                    economic: "Growing".to_string(),
                    social: "Positive".to_string(),
                    technological: "Advanced".to_string(),
                    environmental: "Compliant".to_string(),
                    legal: "Clear".to_string(),
                },
                porters: Porters {
                    supplier_power: "Low".to_string(),
                    buyer_power: "Medium".to_string(),
                    rivalry: "High".to_string(),
                    threat_of_substitutes: "Low".to_string(),
                    threat_of_new_entrants: "Low".to_string(),
                },
                management_deep_dive: Some(ManagementDeepDive {
                    bio: "CEO has 20+ years exp.".to_string(),
                    track_record: "Solid growth.".to_string(),
                    governance: "Independent board.".to_string(),
                }),
            },
            technicals: DeepTechnicals {
                summary: "Neutral".to_string(),
                key_levels: KeyLevels {
                    support: vec![(price * 0.9).floor()],
                    resistance: vec![(price * 1.1).floor()],
                },
                indicators: vec![indicator("RSI", "50".to_string(), "Neutral")],
            },
            valuation: Valuation {
                dcf: Dcf {
                    intrinsic_value: price * 1.1,
                    current_price: price,
                    upside: "+10%".to_string(),
                    assumptions: DcfAssumptions {
                        wacc: "10%".to_string(),
                        terminal_growth: "3%".to_string(),
                        revenue_cagr_5yr: "12%".to_string(),
                    },
                },
                multiples: Multiples {
                    pe_fwd: "20x".to_string(),
                    industry_pe: "18x".to_string(),
                    peg: "1.2".to_string(),
                    verdict: "Fairly Valued".to_string(),
                },
            },
            news: vec![
                NewsItem {
                    headline: format!("{ticker} Announces New Partnership"),
                    impact: "Positive".to_string(),
                    connection: "Revenue growth potential.".to_string(),
                    date: "Today".to_string(),
                },
                NewsItem {
                    headline: "Sector Volatility Increases".to_string(),
                    impact: "Negative".to_string(),
                    connection: "Short-term price pressure.".to_string(),
                    date: "Yesterday".to_string(),
                },
            ],
        }
    }
}

impl Default for MockDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// A live value wins when present and non-zero
fn or_draw(live: Option<f64>, draw: impl FnOnce() -> f64) -> f64 {
    match live {
        Some(value) if value != 0.0 => value,
        _ => draw(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn indicator(name: &str, value: String, signal: &str) -> IndicatorRow {
    IndicatorRow {
        name: name.to_string(),
        value,
        signal: signal.to_string(),
    }
}

fn ratio_row(name: &str, value: String, industry: &str, status: &str, insight: &str) -> RatioRow {
    RatioRow {
        name: name.to_string(),
        value,
        industry: Some(industry.to_string()),
        status: status.to_string(),
        insight: insight.to_string(),
    }
}
