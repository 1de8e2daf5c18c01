//! In-memory holdings table owned by the session.

use log::debug;

use super::holdings_model::{normalize_symbol, Holding};
use crate::errors::{Error, Result};

/// Ordered set of holdings with at most one entry per symbol.
#[derive(Debug, Clone, Default)]
pub struct HoldingsStore {
    holdings: Vec<Holding>,
}

impl HoldingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<&Holding> {
        let symbol = symbol.trim().to_uppercase();
        self.holdings.iter().find(|h| h.symbol == symbol)
    }

    /// Inserts a holding, replacing any entry with the same symbol.
    ///
    /// The replaced entry is dropped, not merged, and the new one goes to the
    /// end of the display order. Returns the replaced entry.
    pub fn upsert(&mut self, holding: Holding) -> Option<Holding> {
        let replaced = self
            .holdings
            .iter()
            .position(|h| h.symbol == holding.symbol)
            .map(|idx| self.holdings.remove(idx));
        if replaced.is_some() {
            debug!("Replacing holding {}", holding.symbol);
        }
        self.holdings.push(holding);
        replaced
    }

    pub fn remove(&mut self, symbol: &str) -> Result<Holding> {
        let symbol = normalize_symbol(symbol)?;
        let idx = self
            .holdings
            .iter()
            .position(|h| h.symbol == symbol)
            .ok_or_else(|| Error::NotFound(format!("Holding {}", symbol)))?;
        Ok(self.holdings.remove(idx))
    }

    /// Swaps in a whole new table.
    pub fn replace_all(&mut self, holdings: Vec<Holding>) {
        debug!(
            "Replacing {} holdings with {}",
            self.holdings.len(),
            holdings.len()
        );
        self.holdings = holdings;
    }

    pub fn into_vec(self) -> Vec<Holding> {
        self.holdings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn holding(symbol: &str, qty: rust_decimal::Decimal, avg: rust_decimal::Decimal) -> Holding {
        Holding::new(symbol, qty, avg, None).unwrap()
    }

    #[test]
    fn test_upsert_replaces_instead_of_merging() {
        let mut store = HoldingsStore::new();
        assert!(store.upsert(holding("X", dec!(10), dec!(100))).is_none());
        let replaced = store.upsert(holding("X", dec!(5), dec!(200)));

        assert_eq!(replaced.map(|h| h.quantity), Some(dec!(10)));
        assert_eq!(store.len(), 1);
        let x = store.get("x").unwrap();
        assert_eq!(x.quantity, dec!(5));
        assert_eq!(x.average_cost, dec!(200));
    }

    #[test]
    fn test_replaced_entry_moves_to_end() {
        let mut store = HoldingsStore::new();
        store.upsert(holding("A", dec!(1), dec!(1)));
        store.upsert(holding("B", dec!(1), dec!(1)));
        store.upsert(holding("A", dec!(2), dec!(1)));

        let order: Vec<&str> = store.list().iter().map(|h| h.symbol.as_str()).collect();
        assert_eq!(order, vec!["B", "A"]);
    }

    #[test]
    fn test_remove() {
        let mut store = HoldingsStore::new();
        store.upsert(holding("TCS", dec!(3), dec!(3000)));

        assert!(matches!(store.remove("INFY"), Err(Error::NotFound(_))));
        let removed = store.remove(" tcs ").unwrap();
        assert_eq!(removed.symbol, "TCS");
        assert!(store.is_empty());
    }

    #[test]
    fn test_replace_all_drops_prior_holdings() {
        let mut store = HoldingsStore::new();
        store.upsert(holding("OLD", dec!(1), dec!(1)));
        store.replace_all(vec![holding("NEW", dec!(2), dec!(2))]);

        assert!(store.get("OLD").is_none());
        assert!(store.get("NEW").is_some());

        store.replace_all(Vec::new());
        assert!(store.is_empty());
    }
}
