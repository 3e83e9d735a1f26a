//! Domain types for overlap allocation.
//!
//! - [`Holding`]: a (symbol, weight) pair
//! - [`Fund`]: an identifier plus unique holdings, built via [`FundBuilder`]
//! - [`FundSet`]: the 2 to 5 funds compared in one run
//! - [`Subset`]: a canonical, non-empty combination of fund identifiers

mod fund;
mod fund_set;
mod holding;
mod subset;

pub use fund::{Fund, FundBuilder};
pub use fund_set::{FundSet, MAX_FUNDS, MIN_FUNDS};
pub use holding::Holding;
pub use subset::{enumerate_subsets, Subset};
