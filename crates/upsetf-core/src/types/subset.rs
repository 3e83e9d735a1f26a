//! Fund subsets and their processing order.

use std::cmp::Ordering;
use std::fmt;

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// A non-empty combination of fund identifiers.
///
/// Members are kept sorted and deduplicated so two subsets naming the same
/// funds compare and hash equal regardless of how they were built.
///
/// Ordering follows allocation priority: larger subsets come first, and
/// subsets of equal size are ordered lexicographically by their sorted
/// members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subset {
    members: Vec<String>,
}

impl Subset {
    /// Creates a subset from fund identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if no identifiers are given.
    pub fn new<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> CoreResult<Self> {
        let mut members: Vec<String> = ids.into_iter().map(Into::into).collect();
        members.sort();
        members.dedup();
        if members.is_empty() {
            return Err(CoreError::invalid_input("subset must name at least one fund"));
        }
        Ok(Self { members })
    }

    /// Creates a single-fund subset.
    #[must_use]
    pub fn singleton(id: impl Into<String>) -> Self {
        Self {
            members: vec![id.into()],
        }
    }

    /// Returns the sorted member identifiers.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Returns the number of funds in the subset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; subsets are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if this is a single-fund subset.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    /// Returns true if `id` is a member.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.members
            .binary_search_by(|m| m.as_str().cmp(id))
            .is_ok()
    }

    /// Joins the members with `sep`.
    #[must_use]
    pub fn label(&self, sep: &str) -> String {
        self.members.join(sep)
    }
}

impl Ord for Subset {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .members
            .len()
            .cmp(&self.members.len())
            .then_with(|| self.members.cmp(&other.members))
    }
}

impl PartialOrd for Subset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.label(","))
    }
}

/// Enumerates every non-empty subset of `ids` in allocation order.
///
/// The result holds 2ⁿ−1 subsets: all n-way combinations first, singletons
/// last, and lexicographic order inside each size class. Input order and
/// duplicates do not affect the output.
#[must_use]
pub fn enumerate_subsets<S: AsRef<str>>(ids: &[S]) -> Vec<Subset> {
    let mut sorted: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();
    sorted.dedup();

    let n = sorted.len();
    let mut subsets: Vec<Subset> = (1u32..(1u32 << n))
        .map(|mask| Subset {
            members: sorted
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, id)| (*id).to_string())
                .collect(),
        })
        .collect();

    subsets.sort();
    subsets
}
