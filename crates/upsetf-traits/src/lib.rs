//! # UpSETF Traits
//!
//! Trait definitions and boundary types for fund holdings sources.
//!
//! This crate contains ONLY the provider boundary with no runtime
//! dependencies. Implementations are in the extension crates.
//!
//! ## Module Structure
//!
//! - [`ids`]: Normalized fund tickers
//! - [`profile`]: Provider payloads (`EtfProfile`, `ProfileHolding`) and exact weight parsing
//! - [`source`]: The async [`HoldingsSource`] trait
//! - [`error`]: [`TraitError`]
//!
//! ## Dependency Injection
//!
//! Front ends hold sources behind the trait:
//!
//! ```ignore
//! let source = CachedHoldingsSource::new(ProfileCache::new(dir), AlphaVantageSource::new(key)?);
//! let profile = source.fetch_profile(&FundId::parse("spy")?).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ids;
pub mod profile;
pub mod source;

// Re-export commonly used types
pub use error::TraitError;
pub use ids::FundId;
pub use profile::{parse_weight, EtfProfile, ProfileHolding, PLACEHOLDER_SYMBOL};
pub use source::{EmptyHoldingsSource, HoldingsSource};
