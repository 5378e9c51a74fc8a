//! View rendering
//!
//! [`Renderer::render_profile`] projects one stored profile onto the
//! [`Page`] and the [`ChartRegistry`], panel by panel:
//!
//! 1. header: name, ticker, price and daily change
//! 2. overview: sentiment bar, key ratios, price chart
//! 3. financials: revenue/net income chart and the written analysis
//! 4. technicals: indicator grid and price/SMA chart
//! 5. moat: moat and management scores with details
//! 6. deep research, when the profile carries it
//!
//! Targets missing from the page are skipped. A template failure aborts the
//! remaining panels; panels already written stay written.

pub mod charts;
pub mod format;
pub mod page;
pub mod templates;

pub use charts::{ChartConfig, ChartRegistry, ChartSlot};
pub use page::{Element, NavItem, Page, ResearchTab, Tab, ids};
pub use templates::Templates;

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::Result;
use crate::indicators::daily_change;
use crate::metrics::Explanation;
use crate::model::{
    DcfAssumptions, DeepResearch, FinancialProfile, ManagementDeepDive, Multiples, Qualitative,
    Ratios, Swot, Technicals,
};
use crate::ticker::Ticker;

/// Everything around the panels: sidebar, tab bar and live polling
#[derive(Debug, Clone, Copy)]
pub struct DashboardChrome<'a> {
    pub sidebar: &'a [NavItem],
    pub active_tab: Tab,
    pub active_research_tab: ResearchTab,
    /// Header polling interval for the live page; `None` for static output
    pub live_poll_ms: Option<u64>,
}

#[derive(Serialize)]
struct RatiosGridView {
    market_cap: String,
    trailing_pe: String,
    forward_pe: String,
    beta: String,
}

#[derive(Serialize)]
struct TechnicalsGridView {
    rsi: String,
    rsi_color: &'static str,
    macd: String,
    sma50: String,
    sma200: String,
}

#[derive(Serialize)]
struct RatioRowView<'a> {
    name: &'a str,
    value: &'a str,
    industry: &'a str,
    status: &'a str,
    insight: &'a str,
    explain_segment: String,
}

#[derive(Serialize)]
struct CategoryView<'a> {
    title: &'static str,
    rows: Vec<RatioRowView<'a>>,
}

#[derive(Serialize)]
struct LabeledView<'a> {
    label: String,
    value: &'a str,
}

#[derive(Serialize)]
struct QualitativeView<'a> {
    swot: &'a Swot,
    pestel: Vec<LabeledView<'a>>,
    porters: Vec<LabeledView<'a>>,
    management: Option<&'a ManagementDeepDive>,
}

#[derive(Serialize)]
struct IndicatorView<'a> {
    name: &'a str,
    value: &'a str,
    signal: &'a str,
    badge: &'static str,
}

#[derive(Serialize)]
struct DeepTechnicalsView<'a> {
    summary: &'a str,
    support: Vec<String>,
    resistance: Vec<String>,
    indicators: Vec<IndicatorView<'a>>,
}

#[derive(Serialize)]
struct ValuationView<'a> {
    intrinsic_value: String,
    current_price: String,
    upside: &'a str,
    upside_class: &'static str,
    assumptions: &'a DcfAssumptions,
    multiples: &'a Multiples,
}

#[derive(Serialize)]
struct NewsView<'a> {
    headline: &'a str,
    date: &'a str,
    impact: &'a str,
    badge: &'static str,
    connection: &'a str,
}

#[derive(Serialize)]
struct TabView {
    id: &'static str,
    label: &'static str,
    active: bool,
}

#[derive(Serialize)]
struct MountedChartView {
    canvas: &'static str,
    config: String,
}

/// Projects profiles onto the page
#[derive(Debug)]
pub struct Renderer {
    templates: Templates,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            templates: Templates::new()?,
        })
    }

    /// Project `profile` onto every panel
    pub fn render_profile(
        &self,
        ticker: &Ticker,
        profile: &FinancialProfile,
        page: &mut Page,
        charts: &mut ChartRegistry,
    ) -> Result<()> {
        debug!(%ticker, "rendering profile");

        self.render_header(ticker, profile, page);

        render_sentiment(&profile.qualitative, page);
        page.set_html(ids::RATIOS_GRID, self.ratios_grid(&profile.ratios)?);
        charts.mount(ChartSlot::Price, charts::price_chart(&profile.price_history));

        charts.mount(
            ChartSlot::Financial,
            charts::financial_chart(&profile.financials),
        );
        let analysis = match &profile.qualitative.financial_analysis {
            Some(text) => self
                .templates
                .render(templates::ANALYSIS, minijinja::context! { text })?,
            None => String::new(),
        };
        page.set_html(ids::FINANCIAL_ANALYSIS, analysis);

        page.set_html(
            ids::TECHNICALS_GRID,
            self.technicals_grid(&profile.technicals)?,
        );
        charts.mount(
            ChartSlot::Technical,
            charts::technical_chart(&profile.price_history)?,
        );

        self.render_moat(&profile.qualitative, page)?;

        match profile.deep_research() {
            Some(deep) => self.render_deep_research(deep, page)?,
            None => {
                debug!(%ticker, "no deep research payload");
                for id in [
                    ids::RATIOS_CONTAINER,
                    ids::QUALITATIVE_CONTAINER,
                    ids::TECHNICALS_CONTAINER,
                    ids::VALUATION_CONTAINER,
                    ids::NEWS_CONTAINER,
                ] {
                    page.set_html(id, "");
                }
            }
        }

        Ok(())
    }

    fn render_header(&self, ticker: &Ticker, profile: &FinancialProfile, page: &mut Page) {
        let price = profile.technicals.current_price;
        let change = daily_change(price, &profile.price_history);

        page.set_text(ids::COMPANY_NAME, profile.header_name(ticker));
        page.set_text(ids::COMPANY_TICKER, ticker.as_str());
        page.set_text(ids::COMPANY_PRICE, format::money(price));
        if let Some(el) = page.element_mut(ids::COMPANY_PRICE) {
            el.set_style("color", "#fff");
        }
        if let Some(el) = page.element_mut(ids::COMPANY_CHANGE) {
            el.set_text(change.display());
            el.set_class(change_class(change.is_negative()));
        }
    }

    fn ratios_grid(&self, ratios: &Ratios) -> Result<String> {
        self.templates.render(
            templates::RATIOS_GRID,
            RatiosGridView {
                market_cap: format::billions(ratios.market_cap),
                trailing_pe: format::fixed(ratios.trailing_pe, 1),
                forward_pe: format::fixed(ratios.forward_pe, 1),
                beta: format::fixed(ratios.beta, 2),
            },
        )
    }

    fn technicals_grid(&self, tech: &Technicals) -> Result<String> {
        self.templates.render(
            templates::TECHNICALS_GRID,
            TechnicalsGridView {
                rsi: format!("{:.1}", tech.rsi),
                rsi_color: format::rsi_color(tech.rsi),
                macd: format!("{:.2}", tech.macd),
                sma50: format::money(tech.sma50),
                sma200: format::money(tech.sma200),
            },
        )
    }

    fn render_moat(&self, qualitative: &Qualitative, page: &mut Page) -> Result<()> {
        page.set_text(ids::MOAT_SCORE, qualitative.moat.score.to_string());
        page.set_text(ids::MANAGEMENT_SCORE, qualitative.management.score.to_string());
        page.set_text(ids::MANAGEMENT_DETAILS, qualitative.management.details.as_str());

        let details = self.templates.render(
            templates::MOAT_DETAILS,
            minijinja::context! { details => &qualitative.moat.details },
        )?;
        page.set_html(ids::MOAT_DETAILS, details);
        Ok(())
    }

    fn render_deep_research(&self, deep: &DeepResearch, page: &mut Page) -> Result<()> {
        let categories: Vec<_> = deep
            .ratios
            .categories()
            .map(|(category, rows)| CategoryView {
                title: category.title(),
                rows: rows
                    .iter()
                    .map(|row| RatioRowView {
                        name: &row.name,
                        value: &row.value,
                        industry: row.industry.as_deref().unwrap_or(format::PLACEHOLDER),
                        status: &row.status,
                        insight: &row.insight,
                        explain_segment: format::path_segment(&row.name),
                    })
                    .collect(),
            })
            .collect();
        let html = self
            .templates
            .render(templates::DEEP_RATIOS, minijinja::context! { categories })?;
        page.set_html(ids::RATIOS_CONTAINER, html);

        let q = &deep.qualitative;
        let html = self.templates.render(
            templates::DEEP_QUALITATIVE,
            QualitativeView {
                swot: &q.swot,
                pestel: q
                    .pestel
                    .entries()
                    .into_iter()
                    .map(|(key, value)| LabeledView {
                        label: format::capitalize(key),
                        value,
                    })
                    .collect(),
                porters: q
                    .porters
                    .entries()
                    .into_iter()
                    .map(|(key, value)| LabeledView {
                        label: format::force_label(key),
                        value,
                    })
                    .collect(),
                management: q.management_deep_dive.as_ref(),
            },
        )?;
        page.set_html(ids::QUALITATIVE_CONTAINER, html);

        let t = &deep.technicals;
        let html = self.templates.render(
            templates::DEEP_TECHNICALS,
            DeepTechnicalsView {
                summary: &t.summary,
                support: t.key_levels.support.iter().map(|l| format::level(*l)).collect(),
                resistance: t.key_levels.resistance.iter().map(|l| format::level(*l)).collect(),
                indicators: t
                    .indicators
                    .iter()
                    .map(|i| IndicatorView {
                        name: &i.name,
                        value: &i.value,
                        signal: &i.signal,
                        badge: format::signal_badge(&i.signal),
                    })
                    .collect(),
            },
        )?;
        page.set_html(ids::TECHNICALS_CONTAINER, html);

        let dcf = &deep.valuation.dcf;
        let html = self.templates.render(
            templates::DEEP_VALUATION,
            ValuationView {
                intrinsic_value: format::money(dcf.intrinsic_value),
                current_price: format::money(dcf.current_price),
                upside: &dcf.upside,
                upside_class: format::upside_class(&dcf.upside),
                assumptions: &dcf.assumptions,
                multiples: &deep.valuation.multiples,
            },
        )?;
        page.set_html(ids::VALUATION_CONTAINER, html);

        let news: Vec<_> = deep
            .news
            .iter()
            .map(|item| NewsView {
                headline: &item.headline,
                date: &item.date,
                impact: &item.impact,
                badge: format::impact_badge(&item.impact),
                connection: &item.connection,
            })
            .collect();
        let html = self
            .templates
            .render(templates::DEEP_NEWS, minijinja::context! { news })?;
        page.set_html(ids::NEWS_CONTAINER, html);

        Ok(())
    }

    /// Fill and open the explanation modal
    pub fn render_explanation(&self, explanation: &Explanation, page: &mut Page) -> Result<()> {
        page.set_text(ids::MODAL_TITLE, explanation.title());
        match explanation {
            Explanation::Known(def) => {
                let html = self.templates.render(templates::EXPLANATION, def)?;
                page.set_html(ids::MODAL_DESCRIPTION, html);
            }
            Explanation::Unavailable { message, .. } => {
                page.set_text(ids::MODAL_DESCRIPTION, *message);
            }
        }
        if let Some(modal) = page.element_mut(ids::EXPLANATION_MODAL) {
            modal.remove_class("hidden");
        }
        Ok(())
    }

    /// The whole dashboard as an HTML document
    pub fn to_html(
        &self,
        page: &Page,
        charts: &ChartRegistry,
        chrome: &DashboardChrome<'_>,
    ) -> Result<String> {
        let mut elements = BTreeMap::new();
        for id in ids::ALL {
            elements.insert(id.to_string(), page.view(id));
        }
        for tab in Tab::ALL {
            let id = tab.content_id();
            let view = page.view(&id);
            elements.insert(id, view);
        }
        for tab in ResearchTab::ALL {
            let id = tab.content_id();
            let view = page.view(&id);
            elements.insert(id, view);
        }

        let tabs: Vec<_> = Tab::ALL
            .into_iter()
            .map(|tab| TabView {
                id: tab.as_str(),
                label: tab.label(),
                active: tab == chrome.active_tab,
            })
            .collect();
        let research_tabs: Vec<_> = ResearchTab::ALL
            .into_iter()
            .map(|tab| TabView {
                id: tab.as_str(),
                label: tab.label(),
                active: tab == chrome.active_research_tab,
            })
            .collect();

        let mounted = charts
            .mounted()
            .map(|(slot, instance)| {
                Ok(MountedChartView {
                    canvas: slot.canvas_id(),
                    config: instance.config.to_script_json()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let title = page
            .text(ids::COMPANY_TICKER)
            .filter(|t| !t.is_empty())
            .map_or_else(
                || "AlphaOne Research".to_string(),
                |t| format!("{t} | AlphaOne Research"),
            );

        self.templates.render(
            templates::LAYOUT,
            minijinja::context! {
                title,
                elements,
                sidebar => chrome.sidebar,
                tabs,
                research_tabs,
                charts => mounted,
                live_poll_ms => chrome.live_poll_ms,
            },
        )
    }
}

/// Class of the header change element
pub fn change_class(negative: bool) -> &'static str {
    if negative {
        "change negative"
    } else {
        "change positive"
    }
}

fn render_sentiment(qualitative: &Qualitative, page: &mut Page) {
    let sentiment = &qualitative.sentiment;
    if let Some(fill) = page.element_mut(ids::SENTIMENT_FILL) {
        fill.set_style("width", format!("{}%", sentiment.score));
        fill.set_style("background-color", format::sentiment_color(sentiment.score));
    }
    page.set_text(ids::SENTIMENT_LABEL, sentiment.label.as_str());
    page.set_text(ids::SENTIMENT_TEXT, sentiment.details.as_str());
}
