//! # UpSETF Ext File
//!
//! File-based fund profiles for UpSETF.
//!
//! - [`ProfileCache`]: one pretty-printed `<TICKER>.json` per fund under a data directory
//! - [`FileHoldingsSource`]: a [`HoldingsSource`](upsetf_traits::HoldingsSource) that reads only from the cache
//!
//! For live data, wrap a network source with `CachedHoldingsSource` from
//! `upsetf-ext-alphavantage`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cache;
mod source;

pub use cache::{CacheEntry, ProfileCache, DEFAULT_DATA_DIR};
pub use source::FileHoldingsSource;
