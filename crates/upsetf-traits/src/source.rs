//! Holdings source trait.
//!
//! A source turns a [`FundId`] into an [`EtfProfile`]. Implementations live in
//! the extension crates: a read-only on-disk cache, the Alpha Vantage HTTP
//! client, and the cache-or-fetch composition of the two.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TraitError;
use crate::ids::FundId;
use crate::profile::EtfProfile;

/// Source of fund profiles.
#[async_trait]
pub trait HoldingsSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the profile of one fund.
    ///
    /// The returned profile has its `ticker` set to `id`.
    async fn fetch_profile(&self, id: &FundId) -> Result<EtfProfile, TraitError>;
}

#[async_trait]
impl<T: HoldingsSource + ?Sized> HoldingsSource for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch_profile(&self, id: &FundId) -> Result<EtfProfile, TraitError> {
        (**self).fetch_profile(id).await
    }
}

/// Source with no profiles; every lookup is `NotFound`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyHoldingsSource;

#[async_trait]
impl HoldingsSource for EmptyHoldingsSource {
    fn name(&self) -> &'static str {
        "empty"
    }

    async fn fetch_profile(&self, id: &FundId) -> Result<EtfProfile, TraitError> {
        Err(TraitError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileHolding;

    struct StaticSource;

    #[async_trait]
    impl HoldingsSource for StaticSource {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn fetch_profile(&self, id: &FundId) -> Result<EtfProfile, TraitError> {
            Ok(EtfProfile::new(id.as_str())
                .with_net_assets("100")
                .with_holding(ProfileHolding::new("AAPL", "0.5")))
        }
    }

    #[tokio::test]
    async fn test_dyn_source() {
        let source: Arc<dyn HoldingsSource> = Arc::new(StaticSource);
        let profile = source.fetch_profile(&FundId::new("spy")).await.unwrap();
        assert_eq!(profile.ticker, "SPY");
        assert_eq!(source.name(), "static");
    }

    #[tokio::test]
    async fn test_empty_source() {
        let err = EmptyHoldingsSource
            .fetch_profile(&FundId::new("QQQ"))
            .await
            .unwrap_err();
        assert!(matches!(err, TraitError::NotFound(ref t) if t == "QQQ"));
    }
}
