//! In-memory presentation surface
//!
//! The dashboard is a fixed set of elements addressed by id. Rendering writes
//! text, HTML, classes and inline styles into them, and
//! [`crate::render::Renderer::to_html`] turns the whole surface into a
//! document.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ResearchError};

/// Element ids written by the renderer
pub mod ids {
    pub const COMPANY_NAME: &str = "company-name";
    pub const COMPANY_TICKER: &str = "company-ticker";
    pub const COMPANY_PRICE: &str = "company-price";
    pub const COMPANY_CHANGE: &str = "company-change";

    pub const SENTIMENT_FILL: &str = "sentiment-fill";
    pub const SENTIMENT_LABEL: &str = "sentiment-label";
    pub const SENTIMENT_TEXT: &str = "sentiment-text";
    pub const RATIOS_GRID: &str = "ratios-grid";

    pub const FINANCIAL_ANALYSIS: &str = "financial-analysis";
    pub const TECHNICALS_GRID: &str = "technicals-grid";

    pub const MOAT_SCORE: &str = "moat-score";
    pub const MANAGEMENT_SCORE: &str = "management-score";
    pub const MANAGEMENT_DETAILS: &str = "management-details";
    pub const MOAT_DETAILS: &str = "moat-details";

    pub const RATIOS_CONTAINER: &str = "ratios-container";
    pub const QUALITATIVE_CONTAINER: &str = "qualitative-container";
    pub const TECHNICALS_CONTAINER: &str = "technicals-container";
    pub const VALUATION_CONTAINER: &str = "valuation-container";
    pub const NEWS_CONTAINER: &str = "news-container";

    pub const EXPLANATION_MODAL: &str = "explanation-modal";
    pub const MODAL_TITLE: &str = "modal-title";
    pub const MODAL_DESCRIPTION: &str = "modal-description";

    /// Span inside the ratios grid holding the trailing P/E
    pub const TRAILING_PE: &str = "ratio-trailing-pe";

    pub const ALL: [&str; 22] = [
        COMPANY_NAME,
        COMPANY_TICKER,
        COMPANY_PRICE,
        COMPANY_CHANGE,
        SENTIMENT_FILL,
        SENTIMENT_LABEL,
        SENTIMENT_TEXT,
        RATIOS_GRID,
        FINANCIAL_ANALYSIS,
        TECHNICALS_GRID,
        MOAT_SCORE,
        MANAGEMENT_SCORE,
        MANAGEMENT_DETAILS,
        MOAT_DETAILS,
        RATIOS_CONTAINER,
        QUALITATIVE_CONTAINER,
        TECHNICALS_CONTAINER,
        VALUATION_CONTAINER,
        NEWS_CONTAINER,
        EXPLANATION_MODAL,
        MODAL_TITLE,
        MODAL_DESCRIPTION,
    ];
}

/// Top-level dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Overview,
    Financials,
    Technicals,
    Moat,
    Research,
}

impl Tab {
    pub const ALL: [Self; 5] = [
        Self::Overview,
        Self::Financials,
        Self::Technicals,
        Self::Moat,
        Self::Research,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Financials => "financials",
            Self::Technicals => "technicals",
            Self::Moat => "moat",
            Self::Research => "research",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Financials => "Financials",
            Self::Technicals => "Technicals",
            Self::Moat => "Moat & Management",
            Self::Research => "Deep Research",
        }
    }

    /// Id of the tab's content panel
    pub fn content_id(self) -> String {
        format!("tab-{}", self.as_str())
    }
}

/// Sub-tabs of the deep research panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchTab {
    #[default]
    Ratios,
    Qualitative,
    Technicals,
    Valuation,
    News,
}

impl ResearchTab {
    pub const ALL: [Self; 5] = [
        Self::Ratios,
        Self::Qualitative,
        Self::Technicals,
        Self::Valuation,
        Self::News,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ratios => "ratios",
            Self::Qualitative => "qualitative",
            Self::Technicals => "technicals",
            Self::Valuation => "valuation",
            Self::News => "news",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ratios => "Ratios",
            Self::Qualitative => "Qualitative",
            Self::Technicals => "Technicals",
            Self::Valuation => "Valuation",
            Self::News => "News",
        }
    }

    /// Id of the sub-tab's content panel
    pub fn content_id(self) -> String {
        format!("research-{}", self.as_str())
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ResearchTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = ResearchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ResearchError::Other(format!("unknown tab '{s}'")))
    }
}

impl FromStr for ResearchTab {
    type Err = ResearchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ResearchError::Other(format!("unknown research tab '{s}'")))
    }
}

/// Element content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Html(String),
}

impl Default for Content {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// One addressable element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    content: Content,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
}

impl Element {
    pub fn with_class(class: &str) -> Self {
        let mut element = Self::default();
        element.set_class(class);
        element
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Plain text; markup is stripped from HTML content
    pub fn text(&self) -> String {
        match &self.content {
            Content::Text(text) => text.clone(),
            Content::Html(html) => strip_tags(html),
        }
    }

    /// Content as markup, escaping plain text
    pub fn inner_html(&self) -> String {
        match &self.content {
            Content::Text(text) => minijinja::HtmlEscape(text).to_string(),
            Content::Html(html) => html.clone(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Content::Text(text.into());
    }

    pub fn set_html(&mut self, html: impl Into<String>) {
        self.content = Content::Html(html.into());
    }

    /// Space-separated class attribute
    pub fn class(&self) -> String {
        self.classes.join(" ")
    }

    /// Replace the whole class list
    pub fn set_class(&mut self, class: &str) {
        self.classes = class.split_whitespace().map(str::to_string).collect();
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        self.styles.insert(property.to_string(), value.into());
    }

    /// Inline `style` attribute
    pub fn style_attr(&self) -> String {
        self.styles
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// The dashboard's element tree, flattened by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    elements: BTreeMap<String, Element>,
}

impl Page {
    /// The full dashboard: every renderer target, tab panel and the modal
    pub fn new() -> Self {
        let mut page = Self::empty();
        for id in ids::ALL {
            page.insert(id, Element::default());
        }
        page.insert(ids::COMPANY_CHANGE, Element::with_class("change positive"));
        page.insert(ids::EXPLANATION_MODAL, Element::with_class("modal hidden"));
        for tab in Tab::ALL {
            page.insert(&tab.content_id(), Element::with_class("tab-content"));
        }
        for tab in ResearchTab::ALL {
            page.insert(&tab.content_id(), Element::with_class("research-sub-content"));
        }
        page.activate(Tab::default());
        page.activate_research(ResearchTab::default());
        page
    }

    /// A page with no elements at all
    pub fn empty() -> Self {
        Self {
            elements: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, id: &str, element: Element) {
        self.elements.insert(id.to_string(), element);
    }

    /// Drop an element; later writes to it are skipped
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Text of an element, if present
    pub fn text(&self, id: &str) -> Option<String> {
        self.element(id).map(Element::text)
    }

    /// Set text when the element exists
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.set_text(text);
        }
    }

    /// Set HTML when the element exists
    pub fn set_html(&mut self, id: &str, html: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.set_html(html);
        }
    }

    /// Mark exactly one top-level tab panel active
    pub fn activate(&mut self, active: Tab) {
        for tab in Tab::ALL {
            if let Some(el) = self.element_mut(&tab.content_id()) {
                if tab == active {
                    el.add_class("active");
                } else {
                    el.remove_class("active");
                }
            }
        }
    }

    /// Mark exactly one research sub-panel active
    pub fn activate_research(&mut self, active: ResearchTab) {
        for tab in ResearchTab::ALL {
            if let Some(el) = self.element_mut(&tab.content_id()) {
                if tab == active {
                    el.add_class("active");
                } else {
                    el.remove_class("active");
                }
            }
        }
    }

    /// Ids of elements carrying `class`
    pub fn ids_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.elements
            .iter()
            .filter(move |(_, el)| el.has_class(class))
            .map(|(id, _)| id.as_str())
    }

    /// Template context for one element; absent elements render empty
    pub(crate) fn view(&self, id: &str) -> ElementView {
        self.element(id).map_or_else(ElementView::default, |el| ElementView {
            html: el.inner_html(),
            class: el.class(),
            style: el.style_attr(),
        })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default, Serialize)]
pub(crate) struct ElementView {
    pub html: String,
    pub class: String,
    pub style: String,
}

/// Sidebar entry for one tracked company
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub ticker: String,
    pub name: String,
    pub active: bool,
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_has_all_targets() {
        let page = Page::new();
        for id in ids::ALL {
            assert!(page.element(id).is_some(), "{id} missing");
        }
        assert!(page.element("nope").is_none());
        assert!(page.element(ids::EXPLANATION_MODAL).unwrap().has_class("hidden"));
    }

    #[test]
    fn test_writes_to_missing_elements_are_skipped() {
        let mut page = Page::empty();
        page.set_text(ids::COMPANY_NAME, "Tesla");
        page.set_html(ids::RATIOS_GRID, "<div></div>");
        assert!(page.text(ids::COMPANY_NAME).is_none());
    }

    #[test]
    fn test_class_and_style_editing() {
        let mut el = Element::with_class("change positive");
        el.remove_class("positive");
        el.add_class("negative");
        el.add_class("negative");
        assert_eq!(el.class(), "change negative");

        el.set_style("width", "60%");
        el.set_style("background-color", "red");
        assert_eq!(el.style("width"), Some("60%"));
        assert_eq!(el.style_attr(), "background-color: red; width: 60%");
    }

    #[test]
    fn test_text_and_html() {
        let mut el = Element::default();
        el.set_text("<b>AT&T");
        assert_eq!(el.inner_html(), "&lt;b&gt;AT&amp;T");

        el.set_html("<strong>Bold</strong> move");
        assert_eq!(el.text(), "Bold move");
    }

    #[test]
    fn test_exactly_one_active_tab() {
        let mut page = Page::new();
        page.activate(Tab::Technicals);
        let active: Vec<_> = page.ids_with_class("active").collect();
        assert_eq!(active, vec!["research-ratios", "tab-technicals"]);

        page.activate_research(ResearchTab::News);
        assert!(page.element("research-news").unwrap().has_class("active"));
        assert!(!page.element("research-ratios").unwrap().has_class("active"));
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("Moat".parse::<Tab>().unwrap(), Tab::Moat);
        assert_eq!("valuation".parse::<ResearchTab>().unwrap(), ResearchTab::Valuation);
        assert!("charts".parse::<Tab>().is_err());
        assert_eq!(Tab::Research.content_id(), "tab-research");
    }
}
