//! # UpSETF Core
//!
//! Weighted overlap of fund holdings, shaped for UpSet plots.
//!
//! Given 2 to 5 funds, each a set of (symbol, weight) holdings, this crate
//! computes for every non-empty combination of funds the weight that belongs
//! to *exactly* that combination and no other. That quantity is the bar
//! height an UpSet plot draws for each intersection.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: allocation is synchronous and deterministic, with no I/O
//! - **Validated inputs**: [`Fund`] and [`FundSet`] reject bad data at construction
//! - **Conservation**: every unit of input weight is claimed by exactly one subset
//!
//! ## Quick Start
//!
//! ```rust
//! use upsetf_core::prelude::*;
//!
//! let fund = |id: &str, w: f64| Fund::builder().id(id).add_holding("META", w).build();
//!
//! let funds = FundSet::new(vec![fund("F1", 0.07)?, fund("F2", 0.14)?, fund("F3", 0.20)?])?;
//! let result = allocate_exclusive(&funds)?;
//!
//! assert!((result.get_members(&["F1", "F2", "F3"]).unwrap() - 0.07).abs() < 1e-12);
//! assert!((result.get_members(&["F2", "F3"]).unwrap() - 0.07).abs() < 1e-12);
//! assert!((result.get_members(&["F3"]).unwrap() - 0.06).abs() < 1e-12);
//! # Ok::<(), upsetf_core::CoreError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`types`] - Holding, Fund, FundSet, Subset
//! - [`allocation`] - Remaining-weight ledger and the allocator
//! - [`result`] - Intersection result and UpSet table shaping

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod allocation;
pub mod error;
pub mod result;
pub mod types;

pub use error::{CoreError, CoreResult};

pub use types::{enumerate_subsets, Fund, FundBuilder, FundSet, Holding, Subset, MAX_FUNDS, MIN_FUNDS};

pub use allocation::{allocate_exclusive, AllocatorConfig, ExclusiveAllocator, Ledger, DEFAULT_EPSILON};

pub use result::{IntersectionResult, SetTotal, UpsetRow, UpsetTable};

/// Prelude module for convenient imports.
///
/// ```rust
/// use upsetf_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::allocation::{allocate_exclusive, AllocatorConfig, ExclusiveAllocator};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::result::{IntersectionResult, UpsetRow, UpsetTable};
    pub use crate::types::{Fund, FundBuilder, FundSet, Holding, Subset};
}
