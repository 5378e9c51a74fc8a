//! `alpha explain`

use alpha_research::Explanation;
use alpha_research::metrics;

pub fn execute(metric: &str) {
    println!("{}", describe(&metrics::explain(metric)));
}

/// Plain-text form of the explanation modal
pub fn describe(explanation: &Explanation) -> String {
    match explanation {
        Explanation::Known(def) => format!(
            "{}\n\n{}\n\nFormula: {}\n\nInterpretation: {}",
            def.name, def.definition, def.formula, def.interpretation
        ),
        Explanation::Unavailable { name, message } => format!("{name}\n\n{message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_metric() {
        let text = describe(&metrics::explain("Quick Ratio"));
        assert!(text.starts_with("Quick Ratio\n"));
        assert!(text.contains("Formula: "));
    }

    #[test]
    fn test_unknown_metric() {
        let text = describe(&metrics::explain("EPS"));
        assert_eq!(text, format!("EPS\n\n{}", metrics::NO_EXPLANATION));
    }
}
