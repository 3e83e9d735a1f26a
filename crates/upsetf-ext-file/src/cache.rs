//! Per-ticker JSON files under a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use upsetf_traits::{EtfProfile, FundId, TraitError};

/// Default cache directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Summary of one cached profile.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Fund the file belongs to.
    pub id: FundId,
    /// Location on disk.
    pub path: PathBuf,
    /// File size.
    pub size_bytes: u64,
    /// Fetch timestamp recorded in the payload, if readable.
    pub fetched_at: Option<String>,
    /// Number of holdings lines, or `None` if the file does not parse.
    pub holdings: Option<usize>,
}

/// On-disk profile cache: one `<TICKER>.json` per fund.
#[derive(Debug, Clone)]
pub struct ProfileCache {
    data_dir: PathBuf,
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl ProfileCache {
    /// Create a cache rooted at `data_dir`. The directory is created on first save.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Cache root.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File that holds `id`'s profile.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::InvalidInput`] unless the ticker is a single
    /// plain file name, so no ID can reach outside the data directory.
    pub fn path_for(&self, id: &FundId) -> Result<PathBuf, TraitError> {
        let file_name = format!("{}.json", id.as_str());
        let mut components = Path::new(&file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None)
                if name == file_name.as_str() && !file_name.starts_with('.') =>
            {
                Ok(self.data_dir.join(&file_name))
            }
            _ => Err(TraitError::InvalidInput(format!(
                "ticker '{}' is not a valid cache file name",
                id
            ))),
        }
    }

    /// Load a cached profile.
    ///
    /// Missing files, unreadable files and payloads without holdings are all
    /// a miss. The latter two are logged.
    pub fn load(&self, id: &FundId) -> Option<EtfProfile> {
        let path = match self.path_for(id) {
            Ok(path) => path,
            Err(e) => {
                warn!(ticker = %id, error = %e, "refusing cache lookup");
                return None;
            }
        };
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable cache file");
                return None;
            }
        };

        match serde_json::from_str::<EtfProfile>(&content) {
            Ok(profile) if profile.holdings.is_empty() => {
                debug!(ticker = %id, "cached profile has no holdings");
                None
            }
            Ok(mut profile) => {
                if profile.ticker.is_empty() {
                    profile.ticker = id.to_string();
                }
                Some(profile)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt cache file");
                None
            }
        }
    }

    /// Write `profile` as pretty-printed JSON, creating the directory if needed.
    ///
    /// Returns the path written.
    pub fn save(&self, id: &FundId, profile: &EtfProfile) -> Result<PathBuf, TraitError> {
        let path = self.path_for(id)?;
        fs::create_dir_all(&self.data_dir)?;

        let json = serde_json::to_string_pretty(profile)
            .map_err(|e| TraitError::SerializationError(e.to_string()))?;

        // Write-then-rename so readers never see a partial file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        debug!(ticker = %id, path = %path.display(), "cached profile");
        Ok(path)
    }

    /// List cached profiles, sorted by ticker.
    ///
    /// A missing data directory is an empty cache.
    pub fn list(&self) -> Result<Vec<CacheEntry>, TraitError> {
        let dir = match fs::read_dir(&self.data_dir) {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for item in dir {
            let path = item?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let size_bytes = fs::metadata(&path)?.len();
            let parsed = fs::read_to_string(&path)
                .ok()
                .and_then(|c| serde_json::from_str::<EtfProfile>(&c).ok());

            entries.push(CacheEntry {
                id: FundId::new(stem),
                size_bytes,
                fetched_at: parsed.as_ref().and_then(|p| p.fetched_at.clone()),
                holdings: parsed.as_ref().map(|p| p.holdings.len()),
                path,
            });
        }

        entries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(entries)
    }

    /// Delete one cached profile. Returns whether a file was removed.
    pub fn remove(&self, id: &FundId) -> Result<bool, TraitError> {
        match fs::remove_file(self.path_for(id)?) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete every cached profile. Returns how many were removed.
    pub fn clear(&self) -> Result<usize, TraitError> {
        let mut removed = 0;
        for entry in self.list()? {
            fs::remove_file(&entry.path)?;
            removed += 1;
        }
        Ok(removed)
    }
}
