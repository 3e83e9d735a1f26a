//! Subset → exclusively claimed weight.

use std::collections::BTreeMap;

use super::UpsetTable;
use crate::types::{enumerate_subsets, Subset};
use serde::{Serialize, Serializer};

/// The weight each fund subset claims exclusively.
///
/// Every non-empty subset of the run's funds has an entry, including those
/// that claimed nothing. Iteration follows allocation order: largest subsets
/// first, lexicographic within a size.
///
/// Serializes as the sorted fund ids plus a list of `{members, weight}`
/// entries in allocation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntersectionResult {
    fund_ids: Vec<String>,
    #[serde(serialize_with = "serialize_weights")]
    weights: BTreeMap<Subset, f64>,
}

#[derive(Serialize)]
struct SubsetWeight<'a> {
    members: &'a [String],
    weight: f64,
}

// JSON map keys must be strings, so subsets go out as a list.
fn serialize_weights<S: Serializer>(
    weights: &BTreeMap<Subset, f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(weights.iter().map(|(subset, &weight)| SubsetWeight {
        members: subset.members(),
        weight,
    }))
}

impl IntersectionResult {
    /// Creates an all-zero result over the given funds.
    #[must_use]
    pub(crate) fn zeroed<S: AsRef<str>>(fund_ids: &[S]) -> Self {
        let mut ids: Vec<String> = fund_ids.iter().map(|s| s.as_ref().to_string()).collect();
        ids.sort();
        ids.dedup();

        let weights = enumerate_subsets(&ids)
            .into_iter()
            .map(|s| (s, 0.0))
            .collect();

        Self {
            fund_ids: ids,
            weights,
        }
    }

    /// Adds `amount` to the entry for `subset`.
    pub(crate) fn record(&mut self, subset: &Subset, amount: f64) {
        if let Some(total) = self.weights.get_mut(subset) {
            *total += amount;
        }
    }

    /// Returns the fund identifiers, sorted.
    #[must_use]
    pub fn fund_ids(&self) -> &[String] {
        &self.fund_ids
    }

    /// Returns the weight claimed by `subset`, or `None` if it names funds
    /// outside this run.
    #[must_use]
    pub fn get(&self, subset: &Subset) -> Option<f64> {
        self.weights.get(subset).copied()
    }

    /// Looks up a subset by its members in any order.
    ///
    /// Returns `None` for an empty list or unknown funds.
    #[must_use]
    pub fn get_members(&self, members: &[&str]) -> Option<f64> {
        Subset::new(members.iter().copied())
            .ok()
            .and_then(|s| self.get(&s))
    }

    /// Iterates over all subsets in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (&Subset, f64)> {
        self.weights.iter().map(|(s, &w)| (s, w))
    }

    /// Iterates over subsets that claimed a positive weight.
    pub fn non_zero(&self) -> impl Iterator<Item = (&Subset, f64)> {
        self.iter().filter(|(_, w)| *w > 0.0)
    }

    /// Returns the number of subsets (2ⁿ−1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the result covers no funds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sums the weight of every subset containing `fund`.
    ///
    /// By conservation this equals the fund's total input weight.
    #[must_use]
    pub fn fund_total(&self, fund: &str) -> f64 {
        self.weights
            .iter()
            .filter(|(s, _)| s.contains(fund))
            .map(|(_, w)| w)
            .sum()
    }

    /// Sums every subset's weight.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Shapes the result as an UpSet table.
    #[must_use]
    pub fn to_upset(&self) -> UpsetTable {
        UpsetTable::from_result(self)
    }
}

impl<'a> IntoIterator for &'a IntersectionResult {
    type Item = (&'a Subset, &'a f64);
    type IntoIter = std::collections::btree_map::Iter<'a, Subset, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.weights.iter()
    }
}
