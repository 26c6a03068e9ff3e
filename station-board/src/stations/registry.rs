//! Shared, refreshable station directory.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::Station;
use crate::source::DataSource;

use super::cache::StationCache;
use super::directory::StationDirectory;
use super::error::StationError;

/// Thread-safe station directory with background refresh.
///
/// Readers take a cheap `Arc` snapshot of the current directory, so a refresh
/// never blocks a board computation that is already running.
#[derive(Clone)]
pub struct StationRegistry {
    inner: Arc<RwLock<Arc<StationDirectory>>>,
    source: DataSource,
    cache: Option<StationCache>,
}

impl StationRegistry {
    /// Load the directory, preferring a fresh disk cache over the network.
    ///
    /// Fails if there is no usable cache and the source is unreachable.
    pub async fn load(source: DataSource, cache: Option<StationCache>) -> Result<Self, StationError> {
        let cached = cache.as_ref().and_then(StationCache::load);

        let stations = match cached {
            Some(stations) => {
                info!(count = stations.len(), "loaded stations from disk cache");
                stations
            }
            None => {
                let stations = source.fetch_stations().await?;
                save_to_cache(cache.as_ref(), &stations);
                stations
            }
        };

        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(StationDirectory::new(stations)))),
            source,
            cache,
        })
    }

    /// Create a registry around an existing directory.
    pub fn with_directory(source: DataSource, directory: StationDirectory) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(directory))),
            source,
            cache: None,
        }
    }

    /// Snapshot of the current directory.
    pub async fn current(&self) -> Arc<StationDirectory> {
        self.inner.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Refresh the directory from the source.
    ///
    /// On success, replaces the current directory and rewrites the disk
    /// cache. On failure, the existing directory is kept.
    pub async fn refresh(&self) -> Result<usize, StationError> {
        let stations = self.source.fetch_stations().await?;
        save_to_cache(self.cache.as_ref(), &stations);

        let directory = Arc::new(StationDirectory::new(stations));
        let count = directory.len();
        *self.inner.write().await = directory;

        Ok(count)
    }
}

fn save_to_cache(cache: Option<&StationCache>, stations: &[Station]) {
    if let Some(cache) = cache {
        if let Err(e) = cache.save(stations) {
            warn!(path = ?cache.path(), error = %e, "failed to write station cache");
        }
    }
}
