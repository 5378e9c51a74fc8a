//! `alpha show`: a profile as terminal tables

use alpha_research::indicators::daily_change;
use alpha_research::render::format;
use alpha_research::{DashboardConfig, FinancialProfile, Ticker};
use anyhow::{Result, anyhow};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

pub async fn execute(config: DashboardConfig, ticker: &str, offline: bool) -> Result<()> {
    let dashboard = super::open_dashboard(config, ticker, offline).await?;
    let ticker = dashboard.current_ticker();
    let profile = dashboard
        .profile(ticker)
        .ok_or_else(|| anyhow!("no profile stored for {ticker}"))?;

    println!("{}", summary_table(ticker, profile));
    println!("{}", financials_table(profile));
    println!("{}", technicals_table(profile));
    Ok(())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Header figures, ratios and scores
pub fn summary_table(ticker: &Ticker, profile: &FinancialProfile) -> Table {
    let price = profile.technicals.current_price;
    let ratios = &profile.ratios;
    let q = &profile.qualitative;

    let mut table = new_table(vec!["Field", "Value"]);
    for (field, value) in [
        ("Company", profile.header_name(ticker)),
        ("Ticker", ticker.to_string()),
        ("Price", format::money(price)),
        (
            "Daily change",
            daily_change(price, &profile.price_history).display(),
        ),
        ("Market cap", format::billions(ratios.market_cap)),
        ("Trailing P/E", format::fixed(ratios.trailing_pe, 1)),
        ("Forward P/E", format::fixed(ratios.forward_pe, 1)),
        ("Beta", format::fixed(ratios.beta, 2)),
        (
            "Sentiment",
            format!("{}/100 ({})", q.sentiment.score, q.sentiment.label),
        ),
        ("Moat", format!("{}/100", q.moat.score)),
        ("Management", format!("{}/100", q.management.score)),
    ] {
        table.add_row(vec![field.to_string(), value]);
    }
    table
}

/// Revenue and net income, most recent year first
pub fn financials_table(profile: &FinancialProfile) -> Table {
    let mut table = new_table(vec!["Year", "Revenue", "Net income"]);
    for year in &profile.financials {
        table.add_row(vec![
            year.year.to_string(),
            format::billions(Some(year.revenue)),
            format::billions(Some(year.net_income)),
        ]);
    }
    table
}

/// Indicator readings with their signals
pub fn technicals_table(profile: &FinancialProfile) -> Table {
    let t = &profile.technicals;
    let mut table = new_table(vec!["Indicator", "Value", "Signal"]);
    table.add_row(vec!["RSI".to_string(), format!("{:.1}", t.rsi), String::new()]);
    table.add_row(vec!["MACD".to_string(), format!("{:.2}", t.macd), String::new()]);
    table.add_row(vec![
        "SMA 50 / 200".to_string(),
        format!("{} / {}", format::money(t.sma50), format::money(t.sma200)),
        String::new(),
    ]);
    for row in &t.indicators {
        table.add_row(vec![row.name.clone(), row.value.clone(), row.signal.clone()]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_research::MockDataGenerator;

    fn profile(symbol: &str) -> (Ticker, FinancialProfile) {
        let ticker = Ticker::parse(symbol).unwrap();
        let profile = MockDataGenerator::with_seed(21).generate(&ticker);
        (ticker, profile)
    }

    #[test]
    fn test_summary_table() {
        let (ticker, profile) = profile("AAPL");
        let rendered = summary_table(&ticker, &profile).to_string();

        assert!(rendered.contains("AAPL Inc."));
        assert!(rendered.contains("$276.25"));
        assert!(rendered.contains("Trailing P/E"));
    }

    #[test]
    fn test_financials_table_has_a_row_per_year() {
        let (_, profile) = profile("MSFT");
        let table = financials_table(&profile);
        assert_eq!(table.row_iter().count(), profile.financials.len());
    }

    #[test]
    fn test_technicals_table_lists_indicators() {
        let (_, profile) = profile("NVDA");
        let table = technicals_table(&profile);
        assert_eq!(table.row_iter().count(), 3 + profile.technicals.indicators.len());
    }
}
