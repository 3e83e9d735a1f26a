//! CLI error types.

use thiserror::Error;
use upsetf_core::CoreError;
use upsetf_traits::TraitError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Ticker could not be parsed.
    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    /// Wrong number of distinct tickers.
    #[error("Expected between {min} and {max} distinct tickers, got {count}.")]
    TickerCount {
        /// Tickers supplied after deduplication.
        count: usize,
        /// Lower bound.
        min: usize,
        /// Upper bound.
        max: usize,
    },

    /// A fund's profile cannot be used. Callers prefix the ticker.
    #[error("{reason}")]
    UnusableFund {
        /// Fund ticker.
        ticker: String,
        /// Why it was skipped.
        reason: String,
    },

    /// Too few funds survived fetching and validation.
    #[error("Need at least {required} valid ETFs with holdings, got {usable}.")]
    NotEnoughFunds {
        /// Funds left.
        usable: usize,
        /// Minimum required.
        required: usize,
    },

    /// Unknown configuration key.
    #[error("Unknown configuration key: {0}. Use api_key, data_dir, or format.")]
    UnknownConfigKey(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Holdings source error.
    #[error("Source error: {0}")]
    Source(#[from] TraitError),

    /// Allocation error.
    #[error("Allocation error: {0}")]
    Core(#[from] CoreError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl CliError {
    /// Creates an unusable-fund error.
    pub fn unusable(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        CliError::UnusableFund {
            ticker: ticker.into(),
            reason: reason.into(),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
