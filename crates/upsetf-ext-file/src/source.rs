//! Holdings source backed by the on-disk cache.

use async_trait::async_trait;
use dashmap::DashMap;
use upsetf_traits::{EtfProfile, FundId, HoldingsSource, TraitError};

use crate::cache::ProfileCache;

/// Serves profiles from a [`ProfileCache`] and never touches the network.
///
/// Profiles are read from disk once and then kept in memory; call
/// [`reload`](Self::reload) after the files change.
pub struct FileHoldingsSource {
    cache: ProfileCache,
    loaded: DashMap<FundId, EtfProfile>,
}

impl FileHoldingsSource {
    /// Create a file source over `cache`.
    pub fn new(cache: ProfileCache) -> Self {
        Self {
            cache,
            loaded: DashMap::new(),
        }
    }

    /// Underlying cache.
    pub fn cache(&self) -> &ProfileCache {
        &self.cache
    }

    /// Forget profiles already read.
    pub fn reload(&self) {
        self.loaded.clear();
    }
}

#[async_trait]
impl HoldingsSource for FileHoldingsSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch_profile(&self, id: &FundId) -> Result<EtfProfile, TraitError> {
        if let Some(profile) = self.loaded.get(id) {
            return Ok(profile.clone());
        }

        let profile = self.cache.load(id).ok_or_else(|| {
            TraitError::NotFound(format!(
                "{} not cached in {}",
                id,
                self.cache.data_dir().display()
            ))
        })?;
        self.loaded.insert(id.clone(), profile.clone());
        Ok(profile)
    }
}
