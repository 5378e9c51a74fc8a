//! Display formatting shared by the page templates

/// Shown in place of a missing figure
pub const PLACEHOLDER: &str = "-";

pub const SUCCESS_COLOR: &str = "var(--success-color)";
pub const WARNING_COLOR: &str = "var(--warning-color)";
pub const DANGER_COLOR: &str = "var(--danger-color)";

/// `$1234.50`
pub fn money(value: f64) -> String {
    format!("${value:.2}")
}

/// `$1234.5B`, or the placeholder when unknown
pub fn billions(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("${:.1}B", v / 1e9))
}

/// Fixed decimals, or the placeholder when unknown
pub fn fixed(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.decimals$}"))
}

/// Whole-dollar price level such as `$801`
pub fn level(value: f64) -> String {
    format!("${value}")
}

/// Fill colour of the sentiment bar
pub fn sentiment_color(score: u32) -> &'static str {
    match score {
        75.. => SUCCESS_COLOR,
        45..=74 => WARNING_COLOR,
        _ => DANGER_COLOR,
    }
}

/// RSI text colour: overbought red, oversold green
pub fn rsi_color(rsi: f64) -> &'static str {
    if rsi > 70.0 {
        DANGER_COLOR
    } else if rsi < 30.0 {
        SUCCESS_COLOR
    } else {
        "white"
    }
}

/// Badge class for an indicator signal
pub fn signal_badge(signal: &str) -> &'static str {
    if signal.contains("Buy") || signal.contains("Bullish") {
        "success"
    } else if signal.contains("Sell") || signal.contains("Bearish") {
        "danger"
    } else {
        "warning"
    }
}

/// Badge class for a news impact
pub fn impact_badge(impact: &str) -> &'static str {
    if impact.eq_ignore_ascii_case("positive") {
        "success"
    } else {
        "danger"
    }
}

/// Class for an upside figure such as `+10%` or `-3.5%`
///
/// Text without a leading number counts as negative.
pub fn upside_class(upside: &str) -> &'static str {
    let numeric: String = upside
        .trim()
        .chars()
        .enumerate()
        .take_while(|(i, c)| c.is_ascii_digit() || *c == '.' || (*i == 0 && matches!(c, '+' | '-')))
        .map(|(_, c)| c)
        .collect();

    match numeric.parse::<f64>() {
        Ok(v) if v >= 0.0 => "positive",
        _ => "negative",
    }
}

/// `political` to `Political`
pub fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// `threat_of_substitutes` to `THREAT OF SUBSTITUTES`
pub fn force_label(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

/// Percent-encode one URL path segment
pub fn path_segment(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                char::from(b).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figures() {
        assert_eq!(money(427.06), "$427.06");
        assert_eq!(billions(Some(1.25e12)), "$1250.0B");
        assert_eq!(billions(None), "-");
        assert_eq!(fixed(Some(31.26), 1), "31.3");
        assert_eq!(fixed(Some(1.234), 2), "1.23");
        assert_eq!(fixed(None, 2), "-");
        assert_eq!(level(801.0), "$801");
    }

    #[test]
    fn test_sentiment_color_thresholds() {
        assert_eq!(sentiment_color(90), SUCCESS_COLOR);
        assert_eq!(sentiment_color(75), SUCCESS_COLOR);
        assert_eq!(sentiment_color(74), WARNING_COLOR);
        assert_eq!(sentiment_color(45), WARNING_COLOR);
        assert_eq!(sentiment_color(44), DANGER_COLOR);
    }

    #[test]
    fn test_rsi_color() {
        assert_eq!(rsi_color(71.0), DANGER_COLOR);
        assert_eq!(rsi_color(29.9), SUCCESS_COLOR);
        assert_eq!(rsi_color(50.0), "white");
    }

    #[test]
    fn test_badges() {
        assert_eq!(signal_badge("Strong Buy"), "success");
        assert_eq!(signal_badge("Bearish"), "danger");
        assert_eq!(signal_badge("Neutral"), "warning");
        assert_eq!(impact_badge("Positive"), "success");
        assert_eq!(impact_badge("Mixed"), "danger");
    }

    #[test]
    fn test_upside_class() {
        assert_eq!(upside_class("+10%"), "positive");
        assert_eq!(upside_class("0%"), "positive");
        assert_eq!(upside_class("-3.5%"), "negative");
        assert_eq!(upside_class("n/a"), "negative");
    }

    #[test]
    fn test_labels() {
        assert_eq!(capitalize("technological"), "Technological");
        assert_eq!(capitalize(""), "");
        assert_eq!(force_label("threat_of_new_entrants"), "THREAT OF NEW ENTRANTS");
    }

    #[test]
    fn test_path_segment() {
        assert_eq!(path_segment("Debt-to-Equity"), "Debt-to-Equity");
        assert_eq!(path_segment("Current Ratio"), "Current%20Ratio");
        assert_eq!(path_segment("P/E"), "P%2FE");
    }
}
