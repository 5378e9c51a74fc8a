//! In-memory profile store

use std::collections::HashMap;

use crate::model::FinancialProfile;
use crate::ticker::Ticker;

/// Ticker-keyed profiles for the session
///
/// Records are only ever replaced wholesale; nothing is removed.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    profiles: HashMap<Ticker, FinancialProfile>,
    order: Vec<Ticker>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ticker: &Ticker) -> Option<&FinancialProfile> {
        self.profiles.get(ticker)
    }

    /// Insert or replace the record for `ticker`
    pub fn set(&mut self, ticker: Ticker, profile: FinancialProfile) {
        if !self.profiles.contains_key(&ticker) {
            self.order.push(ticker.clone());
        }
        self.profiles.insert(ticker, profile);
    }

    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.profiles.contains_key(ticker)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Stored tickers in first-insertion order
    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.order.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MockDataGenerator;

    #[test]
    fn test_set_replaces_without_reordering() {
        let mut generator = MockDataGenerator::with_seed(1);
        let mut store = DataStore::new();
        let tsla = Ticker::parse("TSLA").unwrap();
        let aapl = Ticker::parse("AAPL").unwrap();

        store.set(tsla.clone(), generator.generate(&tsla));
        store.set(aapl.clone(), generator.generate(&aapl));

        let mut replacement = generator.generate(&tsla);
        replacement.company_name = Some("Replaced".to_string());
        store.set(tsla.clone(), replacement);

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get(&tsla).and_then(|p| p.company_name.as_deref()),
            Some("Replaced")
        );
        let order: Vec<_> = store.tickers().map(Ticker::as_str).collect();
        assert_eq!(order, vec!["TSLA", "AAPL"]);
    }

    #[test]
    fn test_missing_ticker() {
        let store = DataStore::new();
        let ticker = Ticker::parse("NONE").unwrap();
        assert!(store.is_empty());
        assert!(!store.contains(&ticker));
        assert!(store.get(&ticker).is_none());
    }
}
