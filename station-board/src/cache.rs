//! Caching layer for live-train responses.
//!
//! The board refreshes every 45 seconds and several handlers may ask for the
//! same station in between, so responses are cached for a short TTL keyed by
//! station and requested train counts.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::digitraffic::{DigitrafficClient, DigitrafficError, LiveTrainsQuery};
use crate::domain::{Station, StationCode, Train};

/// Cache key for live-train responses.
type TrainsKey = (StationCode, LiveTrainsQuery);

/// Cached live-train entry.
type TrainsEntry = Arc<Vec<Train>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_capacity: 200,
        }
    }
}

/// Digitraffic client with caching.
///
/// Wraps a `DigitrafficClient` and caches live-train responses. Station
/// metadata is not cached here; see `stations::StationCache`.
pub struct CachedDigitrafficClient {
    client: DigitrafficClient,
    trains: MokaCache<TrainsKey, TrainsEntry>,
}

impl CachedDigitrafficClient {
    /// Create a new cached client.
    pub fn new(client: DigitrafficClient, config: &CacheConfig) -> Self {
        let trains = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, trains }
    }

    /// Get live trains for a station, using the cache if available.
    pub async fn fetch_live_trains(
        &self,
        station: &StationCode,
        query: LiveTrainsQuery,
    ) -> Result<TrainsEntry, DigitrafficError> {
        let key = (station.clone(), query);

        if let Some(cached) = self.trains.get(&key).await {
            debug!(station = %station, "live trains cache hit");
            return Ok(cached);
        }

        let trains = Arc::new(self.client.fetch_live_trains(station, query).await?);
        self.trains.insert(key, trains.clone()).await;

        Ok(trains)
    }

    /// Fetch station metadata, bypassing the cache.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, DigitrafficError> {
        self.client.fetch_stations().await
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &DigitrafficClient {
        &self.client
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.trains.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.trains.invalidate_all();
    }
}
