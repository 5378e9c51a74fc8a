//! Explanations for the ratio metrics shown in the deep research tab

use serde::Serialize;

/// Text shown for a metric that has no entry
pub const NO_EXPLANATION: &str = "No detailed explanation available for this metric.";

/// One tooltip entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricDefinition {
    pub name: &'static str,
    pub definition: &'static str,
    pub formula: &'static str,
    pub interpretation: &'static str,
}

pub const METRIC_DEFINITIONS: [MetricDefinition; 8] = [
    MetricDefinition {
        name: "Current Ratio",
        definition: "Measures a company's ability to pay short-term obligations or those due within one year.",
        formula: "Current Assets / Current Liabilities",
        interpretation: "A ratio above 1.0 indicates the company can cover its short-term debt. Higher is generally better, but too high might mean inefficient use of assets.",
    },
    MetricDefinition {
        name: "Quick Ratio",
        definition: "An indicator of a company's short-term liquidity position, measuring ability to meet obligations with most liquid assets.",
        formula: "(Current Assets - Inventory) / Current Liabilities",
        interpretation: "Also known as the 'Acid Test'. It's a more conservative measure than Current Ratio because it excludes inventory.",
    },
    MetricDefinition {
        name: "Debt-to-Equity",
        definition: "A ratio used to evaluate a company's financial leverage.",
        formula: "Total Liabilities / Total Shareholder Equity",
        interpretation: "High ratios indicate the company is aggressively financing growth with debt, which can be risky if earnings are volatile.",
    },
    MetricDefinition {
        name: "Interest Coverage",
        definition: "Measures how easily a company can pay interest on its outstanding debt.",
        formula: "EBIT / Interest Expense",
        interpretation: "A ratio below 1.5 is a warning sign. Higher ratios indicate the company is more capable of meeting interest obligations.",
    },
    MetricDefinition {
        name: "Gross Margin",
        definition: "The difference between revenue and cost of goods sold (COGS), divided by revenue.",
        formula: "(Revenue - COGS) / Revenue",
        interpretation: "Indicates how efficiently a company uses labor and supplies in production. Higher margins mean more capital to pay for other costs.",
    },
    MetricDefinition {
        name: "Net Margin",
        definition: "The percentage of revenue remaining after all operating expenses, interest, taxes and preferred stock dividends have been deducted.",
        formula: "Net Income / Revenue",
        interpretation: "The 'bottom line'. It shows how much of each dollar collected by the company translates into profit.",
    },
    MetricDefinition {
        name: "Inventory Turnover",
        definition: "A ratio showing how many times a company has sold and replaced inventory during a given period.",
        formula: "Cost of Goods Sold / Average Inventory",
        interpretation: "Higher turnover generally means strong sales or ineffective buying. Low turnover implies poor sales and excess inventory.",
    },
    MetricDefinition {
        name: "ROIC",
        definition: "Return on Invested Capital. Assesses a company's efficiency at allocating capital to profitable investments.",
        formula: "NOPAT / Invested Capital",
        interpretation: "If ROIC > WACC (Cost of Capital), the company is creating value. If ROIC < WACC, it is destroying value.",
    },
];

/// Result of a tooltip lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Explanation {
    Known(MetricDefinition),
    Unavailable { name: String, message: &'static str },
}

impl Explanation {
    /// Modal title
    pub fn title(&self) -> &str {
        match self {
            Self::Known(def) => def.name,
            Self::Unavailable { name, .. } => name,
        }
    }
}

/// Look up a metric by its exact display name
pub fn lookup(name: &str) -> Option<&'static MetricDefinition> {
    METRIC_DEFINITIONS.iter().find(|m| m.name == name)
}

/// Explanation for `name`, falling back to [`NO_EXPLANATION`]
pub fn explain(name: &str) -> Explanation {
    lookup(name).map_or_else(
        || Explanation::Unavailable {
            name: name.to_string(),
            message: NO_EXPLANATION,
        },
        |def| Explanation::Known(*def),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_metric() {
        let Explanation::Known(def) = explain("ROIC") else {
            panic!("ROIC should be known");
        };
        assert_eq!(def.formula, "NOPAT / Invested Capital");
        assert!(def.definition.starts_with("Return on Invested Capital"));
        assert!(def.interpretation.contains("WACC"));
    }

    #[test]
    fn test_unknown_metric() {
        let explanation = explain("EV/EBITDA");
        assert_eq!(explanation.title(), "EV/EBITDA");
        assert_eq!(
            explanation,
            Explanation::Unavailable {
                name: "EV/EBITDA".to_string(),
                message: NO_EXPLANATION,
            }
        );
    }

    #[test]
    fn test_every_generated_ratio_is_explained() {
        let names: Vec<_> = METRIC_DEFINITIONS.iter().map(|m| m.name).collect();
        assert_eq!(names.len(), 8);
        for name in ["Current Ratio", "Debt-to-Equity", "Inventory Turnover"] {
            assert!(lookup(name).is_some(), "{name} missing");
        }
    }

    #[test]
    fn test_explanation_json() {
        let value = serde_json::to_value(explain("Net Margin")).unwrap();
        assert_eq!(value["kind"], "known");
        assert_eq!(value["formula"], "Net Income / Revenue");
    }
}
