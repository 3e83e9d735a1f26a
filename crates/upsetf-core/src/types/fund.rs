//! Fund representation and builder.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::Holding;
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// A fund: an identifier plus its holdings keyed by symbol.
///
/// Funds are immutable once built. Construction goes through
/// [`FundBuilder`], which performs all validation so the allocator never
/// sees a negative weight or a repeated symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    id: String,
    holdings: BTreeMap<String, f64>,
}

impl Fund {
    /// Creates a new fund builder.
    #[must_use]
    pub fn builder() -> FundBuilder {
        FundBuilder::new()
    }

    /// Returns the fund identifier (usually its ticker).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the holdings ordered by symbol.
    pub fn holdings(&self) -> impl Iterator<Item = Holding> + '_ {
        self.holdings.iter().map(|(symbol, &weight)| Holding {
            symbol: symbol.clone(),
            weight,
        })
    }

    /// Returns the held symbols in ascending order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.holdings.keys().map(String::as_str)
    }

    /// Returns the weight held in `symbol`, or 0.0 if the fund does not hold it.
    #[must_use]
    pub fn weight_of(&self, symbol: &str) -> f64 {
        self.holdings.get(symbol).copied().unwrap_or(0.0)
    }

    /// Returns true if the fund holds `symbol`.
    #[must_use]
    pub fn holds(&self, symbol: &str) -> bool {
        self.holdings.contains_key(symbol)
    }

    /// Returns the sum of all holding weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.holdings.values().sum()
    }

    /// Returns the number of holdings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Returns true if the fund has no holdings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

/// Builder for constructing a [`Fund`].
///
/// # Example
///
/// ```rust
/// use upsetf_core::Fund;
///
/// let fund = Fund::builder()
///     .id("QQQ")
///     .add_holding("AAPL", 0.09)
///     .add_holding("MSFT", 0.08)
///     .build()
///     .unwrap();
///
/// assert_eq!(fund.len(), 2);
/// assert_eq!(fund.weight_of("AAPL"), 0.09);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FundBuilder {
    id: Option<String>,
    holdings: Vec<(String, f64)>,
}

impl FundBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fund identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a holding.
    #[must_use]
    pub fn add_holding(mut self, symbol: impl Into<String>, weight: f64) -> Self {
        self.holdings.push((symbol.into(), weight));
        self
    }

    /// Adds multiple holdings.
    #[must_use]
    pub fn add_holdings<S: Into<String>>(
        mut self,
        holdings: impl IntoIterator<Item = (S, f64)>,
    ) -> Self {
        self.holdings
            .extend(holdings.into_iter().map(|(s, w)| (s.into(), w)));
        self
    }

    /// Builds the fund.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The identifier is missing or blank
    /// - Any weight is negative, NaN or infinite
    /// - A symbol appears more than once
    pub fn build(self) -> CoreResult<Fund> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| CoreError::invalid_input("fund identifier is missing"))?;

        let mut holdings = BTreeMap::new();
        for (symbol, weight) in self.holdings {
            let holding = Holding::new(symbol, weight).map_err(|e| match e {
                CoreError::InvalidWeight { symbol, value, .. } => {
                    CoreError::invalid_weight(id.clone(), symbol, value)
                }
                other => other,
            })?;

            match holdings.entry(holding.symbol) {
                Entry::Vacant(slot) => {
                    slot.insert(holding.weight);
                }
                Entry::Occupied(slot) => {
                    return Err(CoreError::duplicate_symbol(id, slot.key().clone()));
                }
            }
        }

        Ok(Fund { id, holdings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_fund() {
        let fund = Fund::builder()
            .id("VTI")
            .add_holdings([("MSFT", 0.06), ("AAPL", 0.05)])
            .build()
            .unwrap();

        assert_eq!(fund.id(), "VTI");
        assert_eq!(fund.symbols().collect::<Vec<_>>(), vec!["AAPL", "MSFT"]);
        assert!(fund.holds("MSFT"));
        assert_eq!(fund.weight_of("NVDA"), 0.0);
        assert!((fund.total_weight() - 0.11).abs() < 1e-12);
    }

    #[test]
    fn test_empty_fund_is_allowed() {
        let fund = Fund::builder().id("EMPTY").build().unwrap();
        assert!(fund.is_empty());
        assert_eq!(fund.total_weight(), 0.0);
    }

    #[test]
    fn test_missing_id() {
        let err = Fund::builder().add_holding("AAPL", 0.1).build().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
    }

    #[test]
    fn test_duplicate_symbol() {
        let err = Fund::builder()
            .id("SPY")
            .add_holding("AAPL", 0.07)
            .add_holding("AAPL", 0.01)
            .build()
            .unwrap_err();

        assert_eq!(err, CoreError::duplicate_symbol("SPY", "AAPL"));
    }

    #[test]
    fn test_negative_weight_names_fund() {
        let err = Fund::builder()
            .id("SPY")
            .add_holding("AAPL", -0.07)
            .build()
            .unwrap_err();

        match err {
            CoreError::InvalidWeight { fund, symbol, .. } => {
                assert_eq!(fund, "SPY");
                assert_eq!(symbol, "AAPL");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
