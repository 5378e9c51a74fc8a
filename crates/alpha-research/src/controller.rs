//! Dashboard state and interaction handling
//!
//! [`Dashboard`] owns everything a session needs: the profile store, the
//! generator, the page and its charts, the sidebar, the active tabs and the
//! explanation modal. Each user trigger (search, sidebar click, tab click,
//! info icon) is one method.
//!
//! Searches are split in two so a caller holding the dashboard behind a lock
//! can run the network fetch without it:
//!
//! ```rust,ignore
//! let ticker = Dashboard::parse_search(input)?;
//! let outcome = client.fetch(&ticker).await;
//! dashboard.lock().await.complete_search(ticker, outcome);
//! ```

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::api::ProfileSource;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::generator::MockDataGenerator;
use crate::insights;
use crate::jitter::{self, JitterTick, LiveJitter};
use crate::live::LiveMarketTable;
use crate::metrics::{self, Explanation};
use crate::model::FinancialProfile;
use crate::render::{
    ChartRegistry, DashboardChrome, NavItem, Page, Renderer, ResearchTab, Tab, ids,
};
use crate::store::DataStore;
use crate::ticker::Ticker;

/// Header values for live polling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderSnapshot {
    pub ticker: String,
    pub price: String,
    pub change: String,
    pub change_class: String,
    /// Flash colour left by the last jitter tick
    pub flash: Option<String>,
    pub trailing_pe: Option<String>,
}

/// Application state for one dashboard session
#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    store: DataStore,
    generator: MockDataGenerator,
    renderer: Renderer,
    page: Page,
    charts: ChartRegistry,
    current: Ticker,
    sidebar: Vec<NavItem>,
    active_tab: Tab,
    active_research_tab: ResearchTab,
    explanation: Option<Explanation>,
    jitter: LiveJitter,
}

impl Dashboard {
    /// Create a dashboard from configuration
    ///
    /// Loads the live-data override table when one is configured. Nothing is
    /// rendered until [`Dashboard::bootstrap`] or a switch.
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let mut generator = match config.seed {
            Some(seed) => MockDataGenerator::with_seed(seed),
            None => MockDataGenerator::new(),
        };
        if let Some(path) = &config.live_data_path {
            generator = generator.with_live_data(LiveMarketTable::from_json_file(path)?);
        }
        Self::with_generator(config, generator)
    }

    /// Create a dashboard around an existing generator
    pub fn with_generator(config: DashboardConfig, generator: MockDataGenerator) -> Result<Self> {
        config.validate()?;
        let jitter = match config.seed {
            Some(seed) => LiveJitter::with_seed(seed.wrapping_add(1)),
            None => LiveJitter::new(),
        };

        Ok(Self {
            current: config.default_ticker.clone(),
            config,
            store: DataStore::new(),
            generator,
            renderer: Renderer::new()?,
            page: Page::new(),
            charts: ChartRegistry::new(),
            sidebar: Vec::new(),
            active_tab: Tab::default(),
            active_research_tab: ResearchTab::default(),
            explanation: None,
            jitter,
        })
    }

    /// Seed the configured watchlist and show the default ticker
    pub fn bootstrap(&mut self) {
        let watchlist = self.config.watchlist.clone();
        self.seed_watchlist(&watchlist);
        let ticker = self.config.default_ticker.clone();
        self.add_to_sidebar(&ticker);
        self.switch_company(ticker);
    }

    /// Generate, curate and store a profile for each ticker
    ///
    /// Tickers already in the store are only added to the sidebar.
    pub fn seed_watchlist(&mut self, tickers: &[Ticker]) {
        for ticker in tickers {
            if !self.store.contains(ticker) {
                let mut profile = self.generator.generate(ticker);
                if let Some(curated) = insights::curated(ticker) {
                    curated.apply(&mut profile);
                }
                self.store.set(ticker.clone(), profile);
            }
            self.add_to_sidebar(ticker);
        }
        info!(count = tickers.len(), "seeded watchlist");
    }

    /// Validate search input
    ///
    /// Empty input is ignored silently; malformed input is logged and ignored.
    pub fn parse_search(input: &str) -> Option<Ticker> {
        if input.trim().is_empty() {
            return None;
        }
        match Ticker::parse(input) {
            Ok(ticker) => Some(ticker),
            Err(e) => {
                warn!(input, error = %e, "ignoring search");
                None
            }
        }
    }

    /// Search for a ticker: fetch, store, add to the sidebar and switch
    pub async fn search(&mut self, source: &dyn ProfileSource, input: &str) -> Option<Ticker> {
        let ticker = Self::parse_search(input)?;
        let outcome = source.fetch(&ticker).await;
        self.complete_search(ticker.clone(), outcome);
        Some(ticker)
    }

    /// Apply the outcome of a research fetch, then show the ticker
    ///
    /// A fetched profile replaces any stored one. On failure a generated
    /// profile is stored only when there is none yet.
    pub fn complete_search(&mut self, ticker: Ticker, outcome: Result<FinancialProfile>) {
        match outcome {
            Ok(profile) => {
                info!(%ticker, "loaded research profile");
                self.store.set(ticker.clone(), profile);
            }
            Err(e) => {
                warn!(%ticker, error = %e, "research service unavailable, falling back to generated data");
                if !self.store.contains(&ticker) {
                    let profile = self.generator.generate(&ticker);
                    self.store.set(ticker.clone(), profile);
                }
            }
        }

        self.add_to_sidebar(&ticker);
        self.switch_company(ticker);
    }

    fn add_to_sidebar(&mut self, ticker: &Ticker) {
        if self.sidebar.iter().any(|item| item.ticker == ticker.as_str()) {
            return;
        }
        let name = self.store.get(ticker).map_or_else(
            || format!("{ticker} Corp"),
            |profile| profile.sidebar_name(ticker),
        );
        self.sidebar.push(NavItem {
            ticker: ticker.to_string(),
            name,
            active: false,
        });
    }

    /// Make `ticker` current and render it
    pub fn switch_company(&mut self, ticker: Ticker) {
        for item in &mut self.sidebar {
            item.active = item.ticker == ticker.as_str();
        }
        self.current = ticker.clone();
        self.load_company(&ticker);
    }

    /// Render the stored profile for `ticker`
    ///
    /// A missing profile is generated and stored first. Render failures are
    /// logged; panels written before the failure keep their new content.
    pub fn load_company(&mut self, ticker: &Ticker) {
        if !self.store.contains(ticker) {
            error!(%ticker, "no data found");
            debug!(%ticker, "generating profile");
            let profile = self.generator.generate(ticker);
            self.store.set(ticker.clone(), profile);
        }

        let Some(profile) = self.store.get(ticker) else {
            error!(%ticker, "no data after generating, skipping render");
            return;
        };

        if let Err(e) = self
            .renderer
            .render_profile(ticker, profile, &mut self.page, &mut self.charts)
        {
            error!(%ticker, error = %e, "error loading company data");
        }
    }

    /// Show one top-level tab
    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.page.activate(tab);
    }

    /// Show one deep research sub-tab
    pub fn switch_research_tab(&mut self, tab: ResearchTab) {
        self.active_research_tab = tab;
        self.page.activate_research(tab);
    }

    /// Open the explanation modal for a metric
    pub fn explain(&mut self, metric: &str) -> &Explanation {
        let explanation = metrics::explain(metric);
        if let Err(e) = self.renderer.render_explanation(&explanation, &mut self.page) {
            error!(metric, error = %e, "failed to render explanation");
        }
        self.explanation.insert(explanation)
    }

    /// Close the explanation modal
    pub fn close_explanation(&mut self) {
        if let Some(modal) = self.page.element_mut(ids::EXPLANATION_MODAL) {
            modal.add_class("hidden");
        }
        self.explanation = None;
    }

    /// Drift the displayed price and P/E once
    pub fn tick_jitter(&mut self) -> Option<JitterTick> {
        self.jitter.apply(&mut self.page)
    }

    /// Current header values as displayed
    pub fn header(&self) -> HeaderSnapshot {
        let change = self.page.element(ids::COMPANY_CHANGE);
        HeaderSnapshot {
            ticker: self.current.to_string(),
            price: self.page.text(ids::COMPANY_PRICE).unwrap_or_default(),
            change: change.map(|el| el.text()).unwrap_or_default(),
            change_class: change.map(|el| el.class()).unwrap_or_default(),
            flash: self
                .page
                .element(ids::COMPANY_PRICE)
                .and_then(|el| el.style("color"))
                .map(str::to_string),
            trailing_pe: jitter::displayed_trailing_pe(&self.page),
        }
    }

    /// The dashboard as an HTML document
    ///
    /// `live_poll_ms` adds a script polling `/api/header`.
    pub fn to_html(&self, live_poll_ms: Option<u64>) -> Result<String> {
        let chrome = DashboardChrome {
            sidebar: &self.sidebar,
            active_tab: self.active_tab,
            active_research_tab: self.active_research_tab,
            live_poll_ms,
        };
        self.renderer.to_html(&self.page, &self.charts, &chrome)
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn current_ticker(&self) -> &Ticker {
        &self.current
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn profile(&self, ticker: &Ticker) -> Option<&FinancialProfile> {
        self.store.get(ticker)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    pub fn sidebar(&self) -> &[NavItem] {
        &self.sidebar
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn active_research_tab(&self) -> ResearchTab {
        self.active_research_tab
    }

    /// The open explanation, if the modal is showing
    pub fn explanation(&self) -> Option<&Explanation> {
        self.explanation.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::research::MockProfileSource;
    use crate::error::ResearchError;
    use std::time::Duration;

    fn ticker(symbol: &str) -> Ticker {
        Ticker::parse(symbol).unwrap()
    }

    fn dashboard() -> Dashboard {
        let config = DashboardConfig::builder().seed(42).build().unwrap();
        Dashboard::new(config).unwrap()
    }

    fn timeout(symbol: &str) -> ResearchError {
        ResearchError::Timeout {
            ticker: symbol.to_string(),
            after: Duration::from_millis(8000),
        }
    }

    fn failing_source() -> MockProfileSource {
        let mut source = MockProfileSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|t| Err(timeout(t.as_str())));
        source
    }

    #[test]
    fn test_bootstrap_seeds_and_renders_default() {
        let mut dash = dashboard();
        dash.bootstrap();

        let symbols: Vec<_> = dash.sidebar().iter().map(|i| i.ticker.as_str()).collect();
        assert_eq!(symbols, vec!["TSLA", "NVDA", "AAPL", "NKE"]);
        assert_eq!(dash.sidebar()[1].name, "NVIDIA Corporation");
        assert!(dash.sidebar()[0].active);
        assert_eq!(dash.current_ticker().as_str(), "TSLA");
        assert_eq!(dash.page().text(ids::COMPANY_NAME).unwrap(), "Tesla, Inc.");
        assert_eq!(dash.charts().live_instances(), 3);
    }

    #[tokio::test]
    async fn test_search_success_replaces_record() {
        let mut dash = dashboard();
        dash.bootstrap();
        let aapl = ticker("AAPL");

        let mut fetched = MockDataGenerator::with_seed(5).generate(&aapl);
        fetched.company_name = Some("Apple (live)".to_string());
        let expected = fetched.clone();

        let mut source = MockProfileSource::new();
        source
            .expect_fetch()
            .withf(|t| t.as_str() == "AAPL")
            .times(1)
            .returning(move |_| Ok(fetched.clone()));

        let result = dash.search(&source, " aapl ").await;
        assert_eq!(result, Some(aapl.clone()));
        assert_eq!(dash.profile(&aapl), Some(&expected));
        assert_eq!(dash.page().text(ids::COMPANY_NAME).unwrap(), "Apple (live)");
        assert_eq!(dash.sidebar().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_search_keeps_existing_record() {
        let mut dash = dashboard();
        dash.bootstrap();
        let nvda = ticker("NVDA");
        let before = dash.profile(&nvda).cloned();

        dash.search(&failing_source(), "NVDA").await;

        assert_eq!(dash.profile(&nvda).cloned(), before);
        assert_eq!(dash.current_ticker(), &nvda);
        assert_eq!(dash.sidebar().iter().filter(|i| i.ticker == "NVDA").count(), 1);
    }

    #[tokio::test]
    async fn test_failed_search_generates_new_record() {
        let mut dash = dashboard();
        dash.bootstrap();
        let zzz = ticker("ZZZ");

        dash.search(&failing_source(), "zzz").await;

        let profile = dash.profile(&zzz).unwrap();
        assert!((100.0..1000.0).contains(&profile.technicals.current_price));
        let entry = dash.sidebar().last().unwrap();
        assert_eq!((entry.ticker.as_str(), entry.name.as_str()), ("ZZZ", "ZZZ Corp"));
        assert!(entry.active);
        assert_eq!(dash.sidebar().iter().filter(|i| i.active).count(), 1);
        assert_eq!(dash.page().text(ids::COMPANY_NAME).unwrap(), "ZZZ Inc.");
    }

    #[tokio::test]
    async fn test_decode_failure_falls_back() {
        let mut dash = dashboard();
        let mut source = MockProfileSource::new();
        source.expect_fetch().returning(|_| {
            Err(serde_json::from_str::<FinancialProfile>("{}")
                .unwrap_err()
                .into())
        });

        dash.search(&source, "QQQ").await;
        assert!(dash.store().contains(&ticker("QQQ")));
    }

    #[tokio::test]
    async fn test_empty_and_invalid_search_are_noops() {
        let mut dash = dashboard();
        dash.bootstrap();
        let mut source = MockProfileSource::new();
        source.expect_fetch().never();

        assert_eq!(dash.search(&source, "   ").await, None);
        assert_eq!(dash.search(&source, "not a ticker").await, None);
        assert_eq!(dash.store().len(), 4);
        assert_eq!(dash.current_ticker().as_str(), "TSLA");
    }

    #[test]
    fn test_load_company_generates_missing_record() {
        let mut dash = dashboard();
        let msft = ticker("MSFT");
        dash.load_company(&msft);

        assert!(dash.store().contains(&msft));
        assert_eq!(dash.page().text(ids::COMPANY_PRICE).unwrap(), "$490.48");
    }

    #[test]
    fn test_flawed_live_data_file_still_starts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live_market_data.json");
        std::fs::write(
            &path,
            r#"{"^GSPC": {"price": 6000.0}, "TSLA": {"price": null}, "AMD": {"price": 212.5}}"#,
        )
        .unwrap();
        let config = DashboardConfig::builder()
            .seed(42)
            .live_data_path(&path)
            .build()
            .unwrap();

        let mut dash = Dashboard::new(config).unwrap();
        let amd = ticker("AMD");
        dash.load_company(&amd);

        assert_eq!(dash.profile(&amd).unwrap().technicals.current_price, 212.5);
        assert_eq!(dash.page().text(ids::COMPANY_PRICE).unwrap(), "$212.50");
    }

    #[test]
    fn test_switching_companies_does_not_leak_charts() {
        let mut dash = dashboard();
        dash.bootstrap();
        for symbol in ["NVDA", "AAPL", "NKE", "TSLA", "NVDA"] {
            dash.switch_company(ticker(symbol));
        }
        assert_eq!(dash.charts().live_instances(), 3);
        assert_eq!(dash.sidebar().iter().filter(|i| i.active).count(), 1);
    }

    #[test]
    fn test_tab_switching() {
        let mut dash = dashboard();
        dash.switch_tab(Tab::Moat);
        dash.switch_research_tab(ResearchTab::Valuation);

        assert_eq!(dash.active_tab(), Tab::Moat);
        let active: Vec<_> = dash.page().ids_with_class("active").collect();
        assert_eq!(active, vec!["research-valuation", "tab-moat"]);
    }

    #[test]
    fn test_explanation_modal() {
        let mut dash = dashboard();
        let explanation = dash.explain("Interest Coverage").clone();
        assert!(matches!(explanation, Explanation::Known(def) if def.formula == "EBIT / Interest Expense"));
        assert!(!dash.page().element(ids::EXPLANATION_MODAL).unwrap().has_class("hidden"));

        dash.close_explanation();
        assert!(dash.explanation().is_none());
        assert!(dash.page().element(ids::EXPLANATION_MODAL).unwrap().has_class("hidden"));

        assert!(matches!(dash.explain("EPS"), Explanation::Unavailable { .. }));
    }

    #[test]
    fn test_jitter_never_touches_store() {
        let mut dash = dashboard();
        dash.bootstrap();
        let tsla = ticker("TSLA");
        let before = dash.profile(&tsla).cloned();

        for _ in 0..10 {
            assert!(dash.tick_jitter().is_some());
        }
        assert_eq!(dash.profile(&tsla).cloned(), before);
        assert_ne!(dash.header().price, "$427.06");

        dash.switch_company(tsla);
        assert_eq!(dash.header().price, "$427.06");
    }

    #[test]
    fn test_header_snapshot_and_document() {
        let mut dash = dashboard();
        dash.bootstrap();
        let header = dash.header();
        assert_eq!(header.ticker, "TSLA");
        assert_eq!(header.price, "$427.06");
        assert!(header.change_class.starts_with("change "));
        assert!(header.trailing_pe.is_some());

        let html = dash.to_html(Some(2000)).unwrap();
        assert!(html.contains("/api/header"));
        assert!(html.contains("NVIDIA Corporation"));
    }
}
