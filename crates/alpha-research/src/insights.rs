//! Curated qualitative insights for the seed watchlist
//!
//! Generated profiles carry placeholder moat and sentiment text. For the
//! tickers below a hand-written assessment replaces it when the watchlist is
//! seeded.

use crate::model::{FinancialProfile, Management, Moat, Sentiment};
use crate::ticker::Ticker;

/// Hand-written assessment for one company
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuratedInsights {
    pub ticker: &'static str,
    pub company_name: &'static str,
    pub moat_score: u32,
    pub moat_details: &'static [&'static str],
    pub management_score: u32,
    pub management_details: &'static str,
    pub sentiment_score: u32,
    pub sentiment_label: &'static str,
    pub sentiment_details: &'static str,
    pub financial_analysis: &'static str,
}

pub const CURATED: [CuratedInsights; 4] = [
    CuratedInsights {
        ticker: "TSLA",
        company_name: "Tesla, Inc.",
        moat_score: 85,
        moat_details: &[
            "**FSD Data Advantage**: Over 3 billion miles of real-world driving data.",
            "**Supercharger Network**: NACS adoption creates infrastructure dominance.",
            "**Vertical Integration**: In-house battery production and Gigacasting.",
        ],
        management_score: 80,
        management_details: "Elon Musk's visionary leadership is balanced by governance risks due to his split focus.",
        sentiment_score: 60,
        sentiment_label: "Mixed / Volatile",
        sentiment_details: "Short-term bearishness due to EV demand slowing; Long-term bullish on Robotaxi.",
        financial_analysis: "Tesla's revenue growth has moderated to **single digits** in recent quarters as the EV market matures. Margins have compressed due to aggressive price cuts aimed at defending market share. However, **Net Income** remains robust compared to legacy peers, driven by regulatory credits and energy storage profitability. The key metric to watch is **Auto Gross Margin ex-credits**, which needs to stabilize above 17%.",
    },
    CuratedInsights {
        ticker: "NVDA",
        company_name: "NVIDIA Corporation",
        moat_score: 98,
        moat_details: &[
            "**CUDA Ecosystem**: Deep software moat with 4M+ developers.",
            "**Hardware Dominance**: 90%+ share in AI GPUs (Blackwell).",
            "**Innovation Pace**: Annual release cycles keep competitors behind.",
        ],
        management_score: 95,
        management_details: "Jensen Huang is executing flawlessly on the AI infrastructure roadmap.",
        sentiment_score: 90,
        sentiment_label: "Extremely Bullish",
        sentiment_details: "Riding the massive AI wave with record revenues and margins.",
        financial_analysis: "Nvidia is exhibiting **hyper-growth**, with revenue doubling year-over-year. **Gross Margins** are exceptional at ~75%, reflecting immense pricing power and shortage of supply. Operating leverage is kicking in, expanding Net Income margins significantly. The primary financial risk is a potential 'air pocket' in demand if hyperscalers pause capex, but current visibility remains strong.",
    },
    CuratedInsights {
        ticker: "AAPL",
        company_name: "Apple Inc.",
        moat_score: 95,
        moat_details: &[
            "**Ecosystem Lock-in**: iOS 'Walled Garden' creates high retention.",
            "**Services Growth**: High-margin recurring revenue (App Store, iCloud).",
            "**Brand Power**: Unmatched pricing power in consumer electronics.",
        ],
        management_score: 90,
        management_details: "Tim Cook continues to demonstrate operational excellence and capital return discipline.",
        sentiment_score: 75,
        sentiment_label: "Cautiously Optimistic",
        sentiment_details: "Concerns over iPhone China sales vs 'Apple Intelligence' upgrade cycle.",
        financial_analysis: "Apple's top-line growth is **steady but slow**, characteristic of a mature stalwart. The growth engine has shifted to **Services**, which now accounts for ~25% of revenue with double the margins of hardware. **Free Cash Flow** generation is massive, fueling aggressive share buybacks that support EPS growth even when revenue is flat.",
    },
    CuratedInsights {
        ticker: "NKE",
        company_name: "NIKE, Inc.",
        moat_score: 70,
        moat_details: &[
            "**Brand Heritage**: The 'Swoosh' remains one of the most recognizable logos globally.",
            "**Athlete Endorsements**: Dominance in basketball and running sponsorships.",
            "**DTC Scale**: Strong direct-to-consumer digital channels.",
        ],
        management_score: 65,
        management_details: "Recent leadership changes reflect a need to pivot back to product innovation after a period of stagnation.",
        sentiment_score: 40,
        sentiment_label: "Bearish / Turnaround",
        sentiment_details: "Struggling with inventory issues, China slowdown, and rising competition from Hoka/On.",
        financial_analysis: "Nike is currently in a **turnaround phase**. Revenue growth has turned negative/flat due to weakness in North America and Greater China. **Gross Margins** are under pressure from promotional activity to clear inventory. The company is cutting costs to protect profitability, but a return to sustainable growth depends on the success of new product innovation cycles.",
    },
];

/// Curated insights for `ticker`, if any
pub fn curated(ticker: &Ticker) -> Option<&'static CuratedInsights> {
    CURATED.iter().find(|c| c.ticker == ticker.as_str())
}

impl CuratedInsights {
    /// Replace the profile's name and headline qualitative sections
    ///
    /// Deep research, prices and ratios are left untouched.
    pub fn apply(&self, profile: &mut FinancialProfile) {
        profile.company_name = Some(self.company_name.to_string());

        let q = &mut profile.qualitative;
        q.moat = Moat {
            score: self.moat_score,
            details: self.moat_details.iter().map(ToString::to_string).collect(),
        };
        q.management = Management {
            score: self.management_score,
            details: self.management_details.to_string(),
        };
        q.sentiment = Sentiment {
            score: self.sentiment_score,
            label: self.sentiment_label.to_string(),
            details: self.sentiment_details.to_string(),
        };
        q.financial_analysis = Some(self.financial_analysis.to_string());
    }
}
