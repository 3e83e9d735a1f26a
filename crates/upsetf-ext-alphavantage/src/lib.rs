//! # UpSETF Ext Alpha Vantage
//!
//! Fund holdings from the Alpha Vantage `ETF_PROFILE` endpoint.
//!
//! - [`AlphaVantageSource`]: HTTP [`HoldingsSource`](upsetf_traits::HoldingsSource)
//! - [`CachedHoldingsSource`]: serves from a [`ProfileCache`](upsetf_ext_file::ProfileCache)
//!   and fetches only on a miss or when forced
//!
//! ```ignore
//! let source = CachedHoldingsSource::new(
//!     ProfileCache::new("data"),
//!     AlphaVantageSource::new(api_key)?,
//! );
//! let profile = source.fetch_profile(&FundId::parse("spy")?).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cached;
mod client;

pub use cached::CachedHoldingsSource;
pub use client::{
    AlphaVantageConfig, AlphaVantageSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEMO_API_KEY,
};
