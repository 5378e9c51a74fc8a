//! Financial profile data model
//!
//! The JSON field names follow the payload served by the research API, so a
//! profile decoded from the network and one produced by the generator are the
//! same type. Decoding is the validation boundary: a payload missing one of the
//! required sections is rejected instead of being trusted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ticker::Ticker;

/// Complete per-ticker record shown by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProfile {
    /// Display name, when the source knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Yearly statements, most recent first
    pub financials: Vec<YearlyFinancials>,
    pub ratios: Ratios,
    pub technicals: Technicals,
    /// Daily closes, oldest first
    pub price_history: Vec<PricePoint>,
    pub qualitative: Qualitative,
}

impl FinancialProfile {
    /// Name shown in the header
    pub fn header_name(&self, ticker: &Ticker) -> String {
        self.company_name
            .clone()
            .unwrap_or_else(|| format!("{ticker} Inc."))
    }

    /// Name shown in the sidebar
    pub fn sidebar_name(&self, ticker: &Ticker) -> String {
        self.company_name
            .clone()
            .unwrap_or_else(|| format!("{ticker} Corp"))
    }

    /// The deep research payload, if the source provided one
    pub fn deep_research(&self) -> Option<&DeepResearch> {
        self.qualitative.deep_research.as_ref()
    }
}

/// One fiscal year of headline figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyFinancials {
    pub year: i32,
    pub revenue: f64,
    pub net_income: f64,
}

/// Valuation ratios; any of them may be unknown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratios {
    #[serde(rename = "marketCap", default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(rename = "trailingPE", default, skip_serializing_if = "Option::is_none")]
    pub trailing_pe: Option<f64>,
    #[serde(rename = "forwardPE", default, skip_serializing_if = "Option::is_none")]
    pub forward_pe: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
}

/// Technical indicators summarized for the technicals tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technicals {
    pub current_price: f64,
    pub sma50: f64,
    pub sma200: f64,
    /// Oscillator in `[0, 100]`
    pub rsi: f64,
    /// Momentum
    pub macd: f64,
    pub bb_upper: f64,
    pub bb_lower: f64,
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "key_levels", default)]
    pub key_levels: KeyLevels,
    #[serde(default)]
    pub indicators: Vec<IndicatorRow>,
}

/// Support and resistance prices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyLevels {
    #[serde(default)]
    pub support: Vec<f64>,
    #[serde(default)]
    pub resistance: Vec<f64>,
}

/// A named indicator reading with its trading signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub name: String,
    pub value: String,
    pub signal: String,
}

/// A single daily close
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Scored qualitative assessments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualitative {
    pub moat: Moat,
    pub management: Management,
    pub sentiment: Sentiment,
    /// Markdown with `**bold**` spans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_analysis: Option<String>,
    #[serde(rename = "deep_research", default, skip_serializing_if = "Option::is_none")]
    pub deep_research: Option<DeepResearch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moat {
    pub score: u32,
    /// Markdown bullet points
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Management {
    pub score: u32,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub score: u32,
    pub label: String,
    pub details: String,
}

/// Expanded research payload for the deep research tab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeepResearch {
    #[serde(default)]
    pub ratios: RatioTables,
    #[serde(default)]
    pub qualitative: DeepQualitative,
    #[serde(default)]
    pub technicals: DeepTechnicals,
    #[serde(default)]
    pub valuation: Valuation,
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

/// Ratio category labels, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatioCategory {
    Liquidity,
    Solvency,
    Profitability,
    Efficiency,
}

impl RatioCategory {
    pub const ALL: [Self; 4] = [
        Self::Liquidity,
        Self::Solvency,
        Self::Profitability,
        Self::Efficiency,
    ];

    /// Heading used above the category's table
    pub fn title(self) -> &'static str {
        match self {
            Self::Liquidity => "Liquidity",
            Self::Solvency => "Solvency",
            Self::Profitability => "Profitability",
            Self::Efficiency => "Efficiency",
        }
    }
}

/// Ratio rows grouped by fixed category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioTables {
    #[serde(default)]
    pub liquidity: Vec<RatioRow>,
    #[serde(default)]
    pub solvency: Vec<RatioRow>,
    #[serde(default)]
    pub profitability: Vec<RatioRow>,
    #[serde(default)]
    pub efficiency: Vec<RatioRow>,
}

impl RatioTables {
    /// Rows for one category
    pub fn rows(&self, category: RatioCategory) -> &[RatioRow] {
        match category {
            RatioCategory::Liquidity => &self.liquidity,
            RatioCategory::Solvency => &self.solvency,
            RatioCategory::Profitability => &self.profitability,
            RatioCategory::Efficiency => &self.efficiency,
        }
    }

    /// Non-empty categories in display order
    pub fn categories(&self) -> impl Iterator<Item = (RatioCategory, &[RatioRow])> {
        RatioCategory::ALL
            .into_iter()
            .map(|c| (c, self.rows(c)))
            .filter(|(_, rows)| !rows.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioRow {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    pub status: String,
    #[serde(default)]
    pub insight: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeepQualitative {
    #[serde(default)]
    pub swot: Swot,
    #[serde(default)]
    pub pestel: Pestel,
    #[serde(default)]
    pub porters: Porters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_deep_dive: Option<ManagementDeepDive>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Swot {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pestel {
    pub political: String,
    pub economic: String,
    pub social: String,
    pub technological: String,
    pub environmental: String,
    pub legal: String,
}

impl Pestel {
    /// Factors keyed by their field name, in PESTEL order
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("political", &self.political),
            ("economic", &self.economic),
            ("social", &self.social),
            ("technological", &self.technological),
            ("environmental", &self.environmental),
            ("legal", &self.legal),
        ]
    }
}

/// Porter's five forces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Porters {
    pub supplier_power: String,
    pub buyer_power: String,
    pub rivalry: String,
    pub threat_of_substitutes: String,
    pub threat_of_new_entrants: String,
}

impl Porters {
    /// Forces keyed by their field name
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("supplier_power", &self.supplier_power),
            ("buyer_power", &self.buyer_power),
            ("rivalry", &self.rivalry),
            ("threat_of_substitutes", &self.threat_of_substitutes),
            ("threat_of_new_entrants", &self.threat_of_new_entrants),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagementDeepDive {
    pub bio: String,
    pub track_record: String,
    pub governance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepTechnicals {
    pub summary: String,
    pub key_levels: KeyLevels,
    pub indicators: Vec<IndicatorRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Valuation {
    pub dcf: Dcf,
    pub multiples: Multiples,
}

/// Discounted cash flow model output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dcf {
    pub intrinsic_value: f64,
    pub current_price: f64,
    /// Signed percentage text such as `+10%`
    pub upside: String,
    pub assumptions: DcfAssumptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DcfAssumptions {
    pub wacc: String,
    pub terminal_growth: String,
    pub revenue_cagr_5yr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Multiples {
    pub pe_fwd: String,
    pub industry_pe: String,
    pub peg: String,
    pub verdict: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub impact: String,
    #[serde(default)]
    pub connection: String,
    #[serde(default)]
    pub date: String,
}
