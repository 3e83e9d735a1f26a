//! Error types for overlap allocation.
//!
//! [`CoreError::InvalidInput`], [`CoreError::DuplicateSymbol`] and
//! [`CoreError::InvalidWeight`] describe bad caller input and are reported
//! before any allocation work starts. [`CoreError::ConservationViolation`] and
//! [`CoreError::LedgerOverdraw`] indicate a defect in the allocator itself.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while building funds or allocating overlap.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The fund set or a fund is structurally invalid.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// The reason the input is invalid.
        reason: String,
    },

    /// A symbol appears twice in one fund's holdings.
    #[error("Duplicate symbol '{symbol}' in fund '{fund}'")]
    DuplicateSymbol {
        /// The fund identifier.
        fund: String,
        /// The repeated symbol.
        symbol: String,
    },

    /// A holding weight is negative, NaN or infinite.
    #[error("Invalid weight for '{symbol}' in fund '{fund}': {value}")]
    InvalidWeight {
        /// The fund identifier (empty when the holding is not yet attached).
        fund: String,
        /// The holding symbol.
        symbol: String,
        /// The offending weight.
        value: f64,
    },

    /// Weight was left unclaimed after every subset was processed.
    #[error("Conservation violated for '{symbol}' in fund '{fund}': {remaining} left unclaimed")]
    ConservationViolation {
        /// The symbol being allocated.
        symbol: String,
        /// The fund with leftover weight.
        fund: String,
        /// The unclaimed amount.
        remaining: f64,
    },

    /// A claim asked for more weight than a fund had left.
    #[error(
        "Ledger overdraw for '{symbol}' in fund '{fund}': requested {requested}, available {available}"
    )]
    LedgerOverdraw {
        /// The symbol being claimed.
        symbol: String,
        /// The fund that would go negative.
        fund: String,
        /// The amount requested.
        requested: f64,
        /// The amount that was available.
        available: f64,
    },
}

impl CoreError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a duplicate symbol error.
    #[must_use]
    pub fn duplicate_symbol(fund: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self::DuplicateSymbol {
            fund: fund.into(),
            symbol: symbol.into(),
        }
    }

    /// Create an invalid weight error.
    #[must_use]
    pub fn invalid_weight(fund: impl Into<String>, symbol: impl Into<String>, value: f64) -> Self {
        Self::InvalidWeight {
            fund: fund.into(),
            symbol: symbol.into(),
            value,
        }
    }

    /// Returns true if this error was caused by caller input rather than an
    /// allocator defect.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::DuplicateSymbol { .. } | Self::InvalidWeight { .. }
        )
    }
}
