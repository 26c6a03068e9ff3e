//! Disk-based cache for station metadata.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::digitraffic::StationDto;
use crate::domain::Station;

use super::error::StationError;

/// Default cache TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Cached station data with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct CachedStations {
    /// Unix timestamp when the cache was written.
    cached_at_secs: u64,
    /// Stations in the feed's wire format.
    stations: Vec<StationDto>,
}

/// Configuration for the station disk cache.
#[derive(Debug, Clone)]
pub struct StationCacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
    /// How long the cache remains valid.
    pub ttl: Duration,
}

impl StationCacheConfig {
    /// Create a new cache config with the given path and default TTL (24 hours).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for StationCacheConfig {
    fn default() -> Self {
        Self::new("stations_cache.json")
    }
}

/// Disk cache for station metadata.
#[derive(Debug, Clone)]
pub struct StationCache {
    config: StationCacheConfig,
}

impl StationCache {
    pub fn new(config: StationCacheConfig) -> Self {
        Self { config }
    }

    /// Try to load stations from the cache.
    ///
    /// Returns `None` if the cache doesn't exist, is invalid, or has expired.
    pub fn load(&self) -> Option<Vec<Station>> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let cached: CachedStations = serde_json::from_str(&contents).ok()?;

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();

        let age_secs = now.saturating_sub(cached.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return None;
        }

        Some(crate::digitraffic::convert_stations(&cached.stations))
    }

    /// Save stations to the cache.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, stations: &[Station]) -> Result<(), StationError> {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| StationError::Cache {
                message: "system time before unix epoch".to_string(),
            })?
            .as_secs();

        let cached = CachedStations {
            cached_at_secs: now,
            stations: stations
                .iter()
                .map(|s| StationDto {
                    station_name: s.name.clone(),
                    station_short_code: s.short_code.as_str().to_string(),
                    passenger_traffic: s.passenger_traffic,
                })
                .collect(),
        };

        if let Some(parent) = self.config.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| StationError::Cache {
                    message: format!("failed to create cache directory: {}", e),
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&cached).map_err(|e| StationError::Cache {
            message: format!("failed to serialize cache: {}", e),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| StationError::Cache {
            message: format!("failed to write cache file: {}", e),
        })?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}
