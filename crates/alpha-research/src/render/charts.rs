//! Chart.js configurations and the per-canvas instance registry

use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::Result;
use crate::indicators::sma_overlay;
use crate::model::{PricePoint, YearlyFinancials};

/// Window of the moving average drawn on the technical chart
pub const SMA_OVERLAY_PERIOD: usize = 20;

/// The three chart canvases
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ChartSlot {
    Price,
    Financial,
    Technical,
}

impl ChartSlot {
    pub const ALL: [Self; 3] = [Self::Price, Self::Financial, Self::Technical];

    /// Id of the canvas the chart is drawn on
    pub fn canvas_id(self) -> &'static str {
        match self {
            Self::Price => "priceChart",
            Self::Financial => "financialChart",
            Self::Technical => "technicalChart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// A complete Chart.js configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One data series; `None` points are drawn as gaps
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
}

impl ChartConfig {
    /// JSON safe to embed inside a `<script>` element
    pub fn to_script_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}

fn series(values: impl IntoIterator<Item = f64>) -> Vec<Option<f64>> {
    values.into_iter().map(Some).collect()
}

fn date_labels(history: &[PricePoint]) -> Vec<String> {
    history.iter().map(|p| p.date.to_string()).collect()
}

fn axis_style() -> Value {
    json!({
        "grid": { "color": "rgba(255,255,255,0.1)" },
        "ticks": { "color": "#a1a1aa" }
    })
}

/// Filled area chart of daily closes
pub fn price_chart(history: &[PricePoint]) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: date_labels(history),
            datasets: vec![Dataset {
                label: "Price".to_string(),
                data: series(history.iter().map(|p| p.close)),
                border_color: Some("#3b82f6".to_string()),
                background_color: Some("rgba(59, 130, 246, 0.25)".to_string()),
                border_width: Some(2),
                fill: Some(true),
                tension: Some(0.4),
                point_radius: Some(0),
                ..Dataset::default()
            }],
        },
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "display": false } },
            "scales": { "x": { "display": false }, "y": { "display": false } },
            "interaction": { "intersect": false, "mode": "index" }
        }),
    }
}

/// Revenue against net income in billions, oldest year first
pub fn financial_chart(financials: &[YearlyFinancials]) -> ChartConfig {
    let oldest_first: Vec<_> = financials.iter().rev().collect();

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: oldest_first.iter().map(|f| f.year.to_string()).collect(),
            datasets: vec![
                Dataset {
                    label: "Revenue ($B)".to_string(),
                    data: series(oldest_first.iter().map(|f| f.revenue / 1e9)),
                    background_color: Some("#3b82f6".to_string()),
                    border_radius: Some(4),
                    ..Dataset::default()
                },
                Dataset {
                    label: "Net Income ($B)".to_string(),
                    data: series(oldest_first.iter().map(|f| f.net_income / 1e9)),
                    background_color: Some("#10b981".to_string()),
                    border_radius: Some(4),
                    ..Dataset::default()
                },
            ],
        },
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "labels": { "color": "#fff" } } },
            "scales": {
                "y": axis_style(),
                "x": { "grid": { "display": false }, "ticks": { "color": "#a1a1aa" } }
            }
        }),
    }
}

/// Closes with a dashed 20-period moving average
pub fn technical_chart(history: &[PricePoint]) -> Result<ChartConfig> {
    let closes: Vec<f64> = history.iter().map(|p| p.close).collect();
    let sma = sma_overlay(&closes, SMA_OVERLAY_PERIOD)?;

    Ok(ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: date_labels(history),
            datasets: vec![
                Dataset {
                    label: "Price".to_string(),
                    data: series(closes),
                    border_color: Some("#ffffff".to_string()),
                    border_width: Some(1),
                    tension: Some(0.1),
                    point_radius: Some(0),
                    ..Dataset::default()
                },
                Dataset {
                    label: format!("SMA {SMA_OVERLAY_PERIOD}"),
                    data: sma,
                    border_color: Some("#f59e0b".to_string()),
                    border_width: Some(1),
                    border_dash: Some(vec![5, 5]),
                    point_radius: Some(0),
                    ..Dataset::default()
                },
            ],
        },
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "labels": { "color": "#fff" } } },
            "scales": { "y": axis_style(), "x": { "display": false } }
        }),
    })
}

/// A chart attached to a canvas
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    pub id: u64,
    pub config: ChartConfig,
}

/// At most one live chart per canvas
#[derive(Debug, Default)]
pub struct ChartRegistry {
    instances: BTreeMap<ChartSlot, ChartInstance>,
    next_id: u64,
    created: u64,
    destroyed: u64,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a chart to `slot`, destroying whatever was drawn there
    pub fn mount(&mut self, slot: ChartSlot, config: ChartConfig) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.created += 1;

        if let Some(previous) = self.instances.insert(slot, ChartInstance { id, config }) {
            self.destroyed += 1;
            debug!(canvas = slot.canvas_id(), destroyed = previous.id, created = id, "replaced chart");
        }
        id
    }

    pub fn get(&self, slot: ChartSlot) -> Option<&ChartInstance> {
        self.instances.get(&slot)
    }

    /// Mounted charts in canvas order
    pub fn mounted(&self) -> impl Iterator<Item = (ChartSlot, &ChartInstance)> {
        self.instances.iter().map(|(slot, instance)| (*slot, instance))
    }

    pub fn live_instances(&self) -> usize {
        self.instances.len()
    }

    /// Charts created over the registry's lifetime
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Charts torn down by a later mount
    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }
}
