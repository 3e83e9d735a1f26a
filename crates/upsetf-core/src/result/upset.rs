//! UpSet-shaped view of an [`IntersectionResult`].
//!
//! An UpSet plot draws one bar per fund combination and a dot matrix showing
//! which funds take part in it. [`UpsetTable`] carries exactly that: the set
//! names, and one row per combination with a membership mask and a size.
//! Plotting front ends consume it directly or through [`UpsetTable::memberships`].

use super::IntersectionResult;
use serde::{Deserialize, Serialize};

/// One bar of an UpSet plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsetRow {
    /// Funds in this combination, sorted.
    pub members: Vec<String>,

    /// Membership mask aligned with [`UpsetTable::sets`].
    pub membership: Vec<bool>,

    /// Number of funds in the combination.
    pub degree: usize,

    /// Weight claimed exclusively by this combination.
    pub weight: f64,
}

/// Per-fund total for the set-size bars of an UpSet plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetTotal {
    /// Fund identifier.
    pub set: String,

    /// Sum of the weights of every row containing the fund.
    pub weight: f64,
}

/// Rows sorted by descending degree, then by members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsetTable {
    /// Fund identifiers, sorted; the column order of every membership mask.
    pub sets: Vec<String>,

    /// One row per fund combination.
    pub rows: Vec<UpsetRow>,
}

impl UpsetTable {
    pub(crate) fn from_result(result: &IntersectionResult) -> Self {
        let sets = result.fund_ids().to_vec();
        let rows = result
            .iter()
            .map(|(subset, weight)| UpsetRow {
                members: subset.members().to_vec(),
                membership: sets.iter().map(|s| subset.contains(s)).collect(),
                degree: subset.len(),
                weight,
            })
            .collect();

        Self { sets, rows }
    }

    /// Drops rows that claimed no weight.
    #[must_use]
    pub fn without_empty(mut self) -> Self {
        self.rows.retain(|r| r.weight > 0.0);
        self
    }

    /// Returns the largest row weight, or 0.0 for an empty table.
    #[must_use]
    pub fn max_weight(&self) -> f64 {
        self.rows.iter().map(|r| r.weight).fold(0.0, f64::max)
    }

    /// Returns per-fund totals in [`sets`](Self::sets) order.
    #[must_use]
    pub fn set_totals(&self) -> Vec<SetTotal> {
        self.sets
            .iter()
            .enumerate()
            .map(|(i, set)| SetTotal {
                set: set.clone(),
                weight: self
                    .rows
                    .iter()
                    .filter(|r| r.membership[i])
                    .map(|r| r.weight)
                    .sum(),
            })
            .collect()
    }

    /// Returns parallel (memberships, sizes) lists, one entry per row.
    ///
    /// This is the input shape of membership-based UpSet builders, where each
    /// element is described by the list of sets it belongs to.
    #[must_use]
    pub fn memberships(&self) -> (Vec<Vec<String>>, Vec<f64>) {
        self.rows
            .iter()
            .map(|r| (r.members.clone(), r.weight))
            .unzip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Subset;

    fn sample() -> IntersectionResult {
        let mut result = IntersectionResult::zeroed(&["QQQ", "SPY"]);
        result.record(&Subset::new(["SPY", "QQQ"]).unwrap(), 0.25);
        result.record(&Subset::singleton("SPY"), 0.5);
        result
    }

    #[test]
    fn test_rows_sorted_by_degree() {
        let table = sample().to_upset();
        assert_eq!(table.sets, vec!["QQQ", "SPY"]);

        let degrees: Vec<usize> = table.rows.iter().map(|r| r.degree).collect();
        assert_eq!(degrees, vec![2, 1, 1]);

        assert_eq!(table.rows[0].membership, vec![true, true]);
        assert_eq!(table.rows[1].members, vec!["QQQ"]);
        assert_eq!(table.rows[2].membership, vec![false, true]);
    }

    #[test]
    fn test_without_empty_and_max() {
        let table = sample().to_upset().without_empty();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.max_weight(), 0.5);
    }

    #[test]
    fn test_set_totals() {
        let totals = sample().to_upset().set_totals();
        assert_eq!(totals[0].set, "QQQ");
        assert!((totals[0].weight - 0.25).abs() < 1e-12);
        assert!((totals[1].weight - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_memberships_shape() {
        let (members, sizes) = sample().to_upset().without_empty().memberships();
        assert_eq!(members, vec![vec!["QQQ", "SPY"], vec!["SPY"]]);
        assert_eq!(sizes, vec![0.25, 0.5]);
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(sample().to_upset()).unwrap();
        assert_eq!(json["sets"][1], "SPY");
        assert_eq!(json["rows"][0]["degree"], 2);
    }
}
