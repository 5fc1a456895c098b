//! Load-once catalog cache.
//!
//! The cache is owned by the caller (typically created once at startup) rather
//! than living in a global. A catalog is rebuilt only when the source file's
//! fingerprint changes or the entry is explicitly invalidated.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::debug;

use crate::domain::DuplicatePolicy;
use crate::error::CatalogError;
use crate::io::ingest::load_catalog;

use super::RateCatalog;

/// Identity of a source file's contents, as far as the filesystem tells us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SourceFingerprint {
    len: u64,
    modified: Option<SystemTime>,
}

impl SourceFingerprint {
    fn of(path: &Path) -> Result<Self, CatalogError> {
        let meta = fs::metadata(path).map_err(|e| CatalogError::DataLoad {
            origin: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

#[derive(Debug)]
struct CachedCatalog {
    fingerprint: SourceFingerprint,
    catalog: Arc<RateCatalog>,
}

#[derive(Debug, Default)]
pub struct CatalogCache {
    policy: DuplicatePolicy,
    entries: HashMap<PathBuf, CachedCatalog>,
}

impl CatalogCache {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
        }
    }

    /// Return the catalog for `path`, parsing the file only if it has not been
    /// loaded yet or has changed since.
    pub fn load(&mut self, path: &Path) -> Result<Arc<RateCatalog>, CatalogError> {
        let key = cache_key(path);
        let fingerprint = SourceFingerprint::of(path)?;

        if let Some(cached) = self.entries.get(&key) {
            if cached.fingerprint == fingerprint {
                debug!(path = %key.display(), "rate catalog cache hit");
                return Ok(Arc::clone(&cached.catalog));
            }
            debug!(path = %key.display(), "rate source changed; reloading");
        } else {
            debug!(path = %key.display(), "rate catalog cache miss");
        }

        let catalog = Arc::new(load_catalog(path, self.policy)?);
        self.entries.insert(
            key,
            CachedCatalog {
                fingerprint,
                catalog: Arc::clone(&catalog),
            },
        );
        Ok(catalog)
    }

    /// Drop the cached catalog for `path`; returns whether one was present.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(&cache_key(path)).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cache_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
