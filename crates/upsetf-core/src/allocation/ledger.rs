//! Per-run tracker of unclaimed weight.

use std::collections::BTreeMap;

use super::DEFAULT_EPSILON;
use crate::types::{FundSet, Subset};
use crate::{CoreError, CoreResult};

/// Remaining weight per (symbol, fund).
///
/// Built fresh for each allocation run and owned by it. Every entry starts at
/// the fund's holding weight (0.0 when the fund does not hold the symbol)
/// and only ever decreases.
#[derive(Debug, Clone)]
pub struct Ledger {
    remaining: BTreeMap<String, BTreeMap<String, f64>>,
    epsilon: f64,
}

impl Ledger {
    /// Builds a ledger covering every symbol held by any fund in the set.
    #[must_use]
    pub fn from_fund_set(fund_set: &FundSet) -> Self {
        let remaining = fund_set
            .symbols()
            .into_iter()
            .map(|symbol| {
                let per_fund = fund_set
                    .funds()
                    .iter()
                    .map(|f| (f.id().to_string(), f.weight_of(symbol)))
                    .collect();
                (symbol.to_string(), per_fund)
            })
            .collect();

        Self {
            remaining,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Sets the tolerance used when checking claims against availability.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Returns the unclaimed weight of `fund` in `symbol`.
    ///
    /// Unknown symbols and funds read as 0.0.
    #[must_use]
    pub fn get(&self, symbol: &str, fund: &str) -> f64 {
        self.remaining
            .get(symbol)
            .and_then(|per_fund| per_fund.get(fund))
            .copied()
            .unwrap_or(0.0)
    }

    /// Returns the smallest unclaimed weight among the members of `funds`.
    #[must_use]
    pub fn bottleneck(&self, symbol: &str, funds: &Subset) -> f64 {
        funds
            .members()
            .iter()
            .map(|f| self.get(symbol, f))
            .fold(f64::INFINITY, f64::min)
    }

    /// Subtracts `amount` from each member's unclaimed weight in `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LedgerOverdraw`] if any member has less than
    /// `amount` left (beyond the tolerance), or if `amount` is negative. No
    /// entry is modified when an error is returned.
    pub fn claim(&mut self, symbol: &str, funds: &Subset, amount: f64) -> CoreResult<()> {
        for fund in funds.members() {
            let available = self.get(symbol, fund);
            if amount < 0.0 || amount > available + self.epsilon {
                return Err(CoreError::LedgerOverdraw {
                    symbol: symbol.to_string(),
                    fund: fund.clone(),
                    requested: amount,
                    available,
                });
            }
        }

        if let Some(per_fund) = self.remaining.get_mut(symbol) {
            for fund in funds.members() {
                if let Some(left) = per_fund.get_mut(fund) {
                    *left = (*left - amount).max(0.0);
                }
            }
        }
        Ok(())
    }

    /// Takes everything `fund` has left in `symbol`, leaving zero behind.
    pub fn sweep(&mut self, symbol: &str, fund: &str) -> f64 {
        self.remaining
            .get_mut(symbol)
            .and_then(|per_fund| per_fund.get_mut(fund))
            .map(std::mem::take)
            .unwrap_or(0.0)
    }

    /// Returns the unclaimed weight in `symbol` summed across funds.
    #[must_use]
    pub fn remaining_for(&self, symbol: &str) -> f64 {
        self.remaining
            .get(symbol)
            .map(|per_fund| per_fund.values().sum())
            .unwrap_or(0.0)
    }

    /// Returns the symbols tracked by this ledger, sorted.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.remaining.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Fund;

    fn meta_fund_set() -> FundSet {
        let fund = |id: &str, w: f64| {
            Fund::builder()
                .id(id)
                .add_holding("META", w)
                .build()
                .unwrap()
        };
        FundSet::new(vec![fund("F1", 0.07), fund("F2", 0.14), fund("F3", 0.20)]).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let ledger = Ledger::from_fund_set(&meta_fund_set());
        assert_eq!(ledger.get("META", "F2"), 0.14);
        assert_eq!(ledger.get("AAPL", "F2"), 0.0);
        assert_eq!(ledger.get("META", "F9"), 0.0);
        assert_eq!(ledger.symbols().collect::<Vec<_>>(), vec!["META"]);
    }

    #[test]
    fn test_claim_and_bottleneck() {
        let mut ledger = Ledger::from_fund_set(&meta_fund_set());
        let all = Subset::new(["F1", "F2", "F3"]).unwrap();

        let amount = ledger.bottleneck("META", &all);
        assert_eq!(amount, 0.07);

        ledger.claim("META", &all, amount).unwrap();
        assert_eq!(ledger.get("META", "F1"), 0.0);
        assert!((ledger.get("META", "F2") - 0.07).abs() < 1e-12);
        assert!((ledger.get("META", "F3") - 0.13).abs() < 1e-12);
        assert_eq!(ledger.bottleneck("META", &all), 0.0);
    }

    #[test]
    fn test_overdraw_leaves_ledger_untouched() {
        let mut ledger = Ledger::from_fund_set(&meta_fund_set());
        let pair = Subset::new(["F1", "F3"]).unwrap();

        let err = ledger.claim("META", &pair, 0.10).unwrap_err();
        assert!(matches!(err, CoreError::LedgerOverdraw { ref fund, .. } if fund == "F1"));
        assert_eq!(ledger.get("META", "F3"), 0.20);

        assert!(ledger.claim("META", &pair, -0.01).is_err());
    }

    #[test]
    fn test_sweep() {
        let mut ledger = Ledger::from_fund_set(&meta_fund_set());
        assert_eq!(ledger.sweep("META", "F3"), 0.20);
        assert_eq!(ledger.get("META", "F3"), 0.0);
        assert_eq!(ledger.sweep("META", "F3"), 0.0);
        assert_eq!(ledger.sweep("NONE", "F3"), 0.0);
        assert!((ledger.remaining_for("META") - 0.21).abs() < 1e-12);
    }
}
