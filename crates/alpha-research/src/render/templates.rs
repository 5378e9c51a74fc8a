//! Compiled page templates
//!
//! Templates use the `.html` extension, so every interpolation is
//! HTML-escaped unless a template marks it `|safe`. The `bold` filter escapes
//! its input before turning `**x**` into `<strong>x</strong>`.

use minijinja::{Environment, HtmlEscape, Value};
use regex::Regex;
use serde::Serialize;

use crate::error::{Result, ResearchError};

pub const LAYOUT: &str = "layout.html";
pub const RATIOS_GRID: &str = "ratios_grid.html";
pub const TECHNICALS_GRID: &str = "technicals_grid.html";
pub const MOAT_DETAILS: &str = "moat_details.html";
pub const ANALYSIS: &str = "analysis.html";
pub const DEEP_RATIOS: &str = "deep_ratios.html";
pub const DEEP_QUALITATIVE: &str = "deep_qualitative.html";
pub const DEEP_TECHNICALS: &str = "deep_technicals.html";
pub const DEEP_VALUATION: &str = "deep_valuation.html";
pub const DEEP_NEWS: &str = "deep_news.html";
pub const EXPLANATION: &str = "explanation.html";

const SOURCES: [(&str, &str); 11] = [
    (LAYOUT, include_str!("../../templates/layout.html")),
    (RATIOS_GRID, include_str!("../../templates/ratios_grid.html")),
    (TECHNICALS_GRID, include_str!("../../templates/technicals_grid.html")),
    (MOAT_DETAILS, include_str!("../../templates/moat_details.html")),
    (ANALYSIS, include_str!("../../templates/analysis.html")),
    (DEEP_RATIOS, include_str!("../../templates/deep_ratios.html")),
    (DEEP_QUALITATIVE, include_str!("../../templates/deep_qualitative.html")),
    (DEEP_TECHNICALS, include_str!("../../templates/deep_technicals.html")),
    (DEEP_VALUATION, include_str!("../../templates/deep_valuation.html")),
    (DEEP_NEWS, include_str!("../../templates/deep_news.html")),
    (EXPLANATION, include_str!("../../templates/explanation.html")),
];

/// `**bold**` spans
const BOLD_PATTERN: &str = r"\*\*(.*?)\*\*";

/// Escape `text`, then render `**x**` spans as `<strong>x</strong>`
pub fn bold_markdown(pattern: &Regex, text: &str) -> String {
    let escaped = HtmlEscape(text).to_string();
    pattern
        .replace_all(&escaped, "<strong>$1</strong>")
        .into_owned()
}

/// The template environment
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Compile every template
    pub fn new() -> Result<Self> {
        let bold = Regex::new(BOLD_PATTERN)
            .map_err(|e| ResearchError::Other(format!("invalid bold pattern: {e}")))?;

        let mut env = Environment::new();
        env.add_filter("bold", move |text: String| {
            Value::from_safe_string(bold_markdown(&bold, &text))
        });
        for (name, source) in SOURCES {
            env.add_template(name, source)?;
        }

        Ok(Self { env })
    }

    /// Render a named template to a string
    pub fn render(&self, name: &str, ctx: impl Serialize) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?.trim().to_string())
    }
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates")
            .field("templates", &SOURCES.map(|(name, _)| name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_bold_escapes_before_marking_up() {
        let pattern = Regex::new(BOLD_PATTERN).unwrap();
        assert_eq!(
            bold_markdown(&pattern, "**CUDA** & <script>"),
            "<strong>CUDA</strong> &amp; &lt;script&gt;"
        );
        assert_eq!(
            bold_markdown(&pattern, "**a** then **b**"),
            "<strong>a</strong> then <strong>b</strong>"
        );
        assert_eq!(bold_markdown(&pattern, "no markup"), "no markup");
    }

    #[test]
    fn test_templates_compile_and_escape() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render(MOAT_DETAILS, context! { details => vec!["**Scale**: <big>"] })
            .unwrap();
        assert_eq!(html, "<li><strong>Scale</strong>: &lt;big&gt;</li>");

        let html = templates
            .render(ANALYSIS, context! { text => "Plain <i>text</i>" })
            .unwrap();
        assert!(html.starts_with("Plain &lt;i&gt;"));
    }

    #[test]
    fn test_unknown_template_is_error() {
        let templates = Templates::new().unwrap();
        assert!(matches!(
            templates.render("missing.html", ()),
            Err(ResearchError::Template(_))
        ));
    }
}
