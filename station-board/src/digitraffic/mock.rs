//! Mock Digitraffic client for running without network access.
//!
//! Loads a station feed and live-train responses from JSON files and serves
//! them as if they were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{Station, StationCode, Train};

use super::convert::{convert_stations, convert_trains};
use super::error::DigitrafficError;
use super::types::{StationDto, TrainDto};

/// Mock client that serves data from JSON files.
///
/// Expects `stations.json` (the `/metadata/stations` payload) and a
/// `live-trains/` directory with one `{CODE}.json` file per station.
#[derive(Debug, Clone)]
pub struct MockDigitrafficClient {
    stations: Arc<Vec<Station>>,
    trains: Arc<HashMap<StationCode, Vec<Train>>>,
}

impl MockDigitrafficClient {
    /// Load mock data from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, DigitrafficError> {
        let data_dir = data_dir.as_ref();

        let stations: Vec<StationDto> = read_json(&data_dir.join("stations.json"))?;
        let stations = convert_stations(&stations);

        let trains_dir = data_dir.join("live-trains");
        let entries = std::fs::read_dir(&trains_dir).map_err(|e| {
            DigitrafficError::Mock(format!("failed to read {:?}: {}", trains_dir, e))
        })?;

        let mut trains = HashMap::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| DigitrafficError::Mock(format!("failed to read entry: {}", e)))?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| DigitrafficError::Mock(format!("invalid filename: {:?}", path)))?;

            let code = StationCode::parse(stem)
                .map_err(|e| DigitrafficError::Mock(format!("{:?}: {}", path, e)))?;

            let dtos: Vec<TrainDto> = read_json(&path)?;
            trains.insert(code, convert_trains(&dtos));
        }

        Ok(Self {
            stations: Arc::new(stations),
            trains: Arc::new(trains),
        })
    }

    /// Mimics `DigitrafficClient::fetch_stations`.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, DigitrafficError> {
        Ok(self.stations.as_ref().clone())
    }

    /// Mimics `DigitrafficClient::fetch_live_trains`. Stations without a
    /// fixture have no trains.
    pub async fn fetch_live_trains(&self, station: &StationCode) -> Result<Vec<Train>, DigitrafficError> {
        Ok(self.trains.get(station).cloned().unwrap_or_default())
    }

    /// Stations that have a live-trains fixture.
    pub fn available_stations(&self) -> Vec<StationCode> {
        self.trains.keys().cloned().collect()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DigitrafficError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| DigitrafficError::Mock(format!("failed to read {:?}: {}", path, e)))?;
    serde_json::from_str(&json)
        .map_err(|e| DigitrafficError::Mock(format!("failed to parse {:?}: {}", path, e)))
}

/// Write a small mock data set into `dir`. Shared by tests across modules.
#[cfg(test)]
pub(crate) fn write_fixtures(dir: &Path, hki_trains: &str) {
    std::fs::write(
        dir.join("stations.json"),
        r#"[
            {"stationName": "Helsinki asema", "stationShortCode": "HKI", "passengerTraffic": true},
            {"stationName": "Pasila asema", "stationShortCode": "PSL", "passengerTraffic": true},
            {"stationName": "Tampere asema", "stationShortCode": "TPE", "passengerTraffic": true}
        ]"#,
    )
    .unwrap();

    let trains_dir = dir.join("live-trains");
    std::fs::create_dir_all(&trains_dir).unwrap();
    std::fs::write(trains_dir.join("HKI.json"), hki_trains).unwrap();
}
