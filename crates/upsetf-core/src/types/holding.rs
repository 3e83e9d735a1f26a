//! A single (symbol, weight) position inside a fund.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// A single holding in a fund.
///
/// The weight is the fraction of the fund's net assets held in `symbol`
/// (0.07 for 7%). Weights of one fund need not sum to 1.0; funds may hold
/// cash or unlisted assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol of the held security.
    pub symbol: String,

    /// Fraction of the fund's net assets.
    pub weight: f64,
}

impl Holding {
    /// Creates a validated holding.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is blank or the weight is negative,
    /// NaN or infinite.
    pub fn new(symbol: impl Into<String>, weight: f64) -> CoreResult<Self> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(CoreError::invalid_input("holding symbol is empty"));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(CoreError::invalid_weight("", symbol, weight));
        }
        Ok(Self { symbol, weight })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_holding() {
        let h = Holding::new("NVDA", 0.2).unwrap();
        assert_eq!(h.symbol, "NVDA");
        assert_eq!(h.weight, 0.2);
        assert_eq!(Holding::new("CASH", 0.0).unwrap().weight, 0.0);
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert!(matches!(
            Holding::new("AAPL", -0.01),
            Err(CoreError::InvalidWeight { .. })
        ));
        assert!(Holding::new("AAPL", f64::NAN).is_err());
        assert!(Holding::new("AAPL", f64::INFINITY).is_err());
    }

    #[test]
    fn test_rejects_blank_symbol() {
        assert!(matches!(
            Holding::new("  ", 0.1),
            Err(CoreError::InvalidInput { .. })
        ));
    }
}
