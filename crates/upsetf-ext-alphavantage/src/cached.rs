//! Cache-or-fetch composition of a [`ProfileCache`] and a network source.

use async_trait::async_trait;
use tracing::{info, warn};
use upsetf_ext_file::ProfileCache;
use upsetf_traits::{EtfProfile, FundId, HoldingsSource, TraitError};

/// Serves profiles from disk when present, otherwise fetches and persists them.
pub struct CachedHoldingsSource<S> {
    cache: ProfileCache,
    inner: S,
    force_refresh: bool,
}

impl<S: HoldingsSource> CachedHoldingsSource<S> {
    /// Wrap `inner` with `cache`.
    pub fn new(cache: ProfileCache, inner: S) -> Self {
        Self {
            cache,
            inner,
            force_refresh: false,
        }
    }

    /// Skip cache reads; fetched profiles are still written.
    #[must_use]
    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    /// Underlying cache.
    pub fn cache(&self) -> &ProfileCache {
        &self.cache
    }

    /// Wrapped network source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: HoldingsSource> HoldingsSource for CachedHoldingsSource<S> {
    fn name(&self) -> &'static str {
        "cached"
    }

    async fn fetch_profile(&self, id: &FundId) -> Result<EtfProfile, TraitError> {
        if !self.force_refresh {
            if let Some(profile) = self.cache.load(id) {
                info!(ticker = %id, "using cached profile");
                return Ok(profile);
            }
        }

        info!(ticker = %id, source = self.inner.name(), "fetching profile");
        let profile = self.inner.fetch_profile(id).await?;

        // Cache write failures are not fatal.
        if let Err(e) = self.cache.save(id, &profile) {
            warn!(ticker = %id, error = %e, "failed to cache profile");
        }
        Ok(profile)
    }
}
