//! Identifier types used across the holdings sources.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TraitError;

/// Fund ticker, normalized to trimmed upper case.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct FundId(String);

impl FundId {
    /// Create a new fund ID, normalizing case and surrounding whitespace.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_uppercase())
    }

    /// Parse user input into a fund ID.
    ///
    /// Accepts ASCII letters, digits, `.`, `-` and `^`, and rejects a
    /// leading `.`, so a parsed ID is always a plain file name.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::InvalidInput`] for blank input or any other
    /// character.
    pub fn parse(input: &str) -> Result<Self, TraitError> {
        let id = Self::new(input);
        if id.0.is_empty() {
            return Err(TraitError::InvalidInput("empty ticker".into()));
        }
        if id.0.starts_with('.') {
            return Err(TraitError::InvalidInput(format!(
                "ticker '{}' starts with '.'",
                id.0
            )));
        }
        if let Some(c) = id.0.chars().find(|c| !is_ticker_char(*c)) {
            return Err(TraitError::InvalidInput(format!(
                "ticker '{}' contains '{}'",
                id.0, c
            )));
        }
        Ok(id)
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_ticker_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | '^')
}

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FundId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for FundId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for FundId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
