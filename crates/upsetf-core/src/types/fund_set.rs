//! The group of funds compared in one allocation run.

use std::collections::{BTreeSet, HashSet};

use super::Fund;
use crate::{CoreError, CoreResult};
use serde::Serialize;

/// Fewest funds for which an intersection means anything.
pub const MIN_FUNDS: usize = 2;

/// Most funds supported; bounds the subset space to 2⁵−1 = 31.
pub const MAX_FUNDS: usize = 5;

/// An ordered, deduplicated group of 2 to 5 funds.
#[derive(Debug, Clone, Serialize)]
pub struct FundSet {
    funds: Vec<Fund>,
}

impl FundSet {
    /// Creates a fund set.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if fewer than [`MIN_FUNDS`] or more
    /// than [`MAX_FUNDS`] funds are supplied, or if two funds share an
    /// identifier.
    pub fn new(funds: Vec<Fund>) -> CoreResult<Self> {
        if funds.len() < MIN_FUNDS {
            return Err(CoreError::invalid_input(format!(
                "at least {MIN_FUNDS} funds are required, got {}",
                funds.len()
            )));
        }
        if funds.len() > MAX_FUNDS {
            return Err(CoreError::invalid_input(format!(
                "at most {MAX_FUNDS} funds are supported, got {}",
                funds.len()
            )));
        }

        let mut seen = HashSet::with_capacity(funds.len());
        for fund in &funds {
            if !seen.insert(fund.id()) {
                return Err(CoreError::invalid_input(format!(
                    "fund '{}' appears more than once",
                    fund.id()
                )));
            }
        }

        Ok(Self { funds })
    }

    /// Returns the funds in input order.
    #[must_use]
    pub fn funds(&self) -> &[Fund] {
        &self.funds
    }

    /// Returns the fund identifiers in input order.
    #[must_use]
    pub fn fund_ids(&self) -> Vec<&str> {
        self.funds.iter().map(Fund::id).collect()
    }

    /// Looks up a fund by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Fund> {
        self.funds.iter().find(|f| f.id() == id)
    }

    /// Returns the number of funds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.funds.len()
    }

    /// Always false; a fund set holds at least [`MIN_FUNDS`] funds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }

    /// Returns every symbol held by at least one fund, sorted.
    #[must_use]
    pub fn symbols(&self) -> BTreeSet<&str> {
        self.funds.iter().flat_map(Fund::symbols).collect()
    }
}
