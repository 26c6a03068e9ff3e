//! Digitraffic rail HTTP client.
//!
//! Provides async methods for the station metadata and live-trains endpoints.
//! Handles the identification header, concurrency limiting, and conversion
//! to domain types.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Station, StationCode, Train};

use super::convert::{convert_stations, convert_trains};
use super::error::DigitrafficError;
use super::types::{StationDto, TrainDto};

/// Default base URL for the Digitraffic rail API.
const DEFAULT_BASE_URL: &str = "https://rata.digitraffic.fi/api/v1";

/// Default value of the `Digitraffic-User` identification header.
const DEFAULT_USER: &str = "station-board";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Which trains to request from the live-trains endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiveTrainsQuery {
    pub arriving_trains: u16,
    pub departing_trains: u16,
    pub include_nonstopping: bool,
}

impl Default for LiveTrainsQuery {
    fn default() -> Self {
        Self {
            arriving_trains: 20,
            departing_trains: 20,
            include_nonstopping: false,
        }
    }
}

/// Configuration for the Digitraffic client.
#[derive(Debug, Clone)]
pub struct DigitrafficConfig {
    /// Sent as the `Digitraffic-User` header
    pub user: String,
    /// Base URL for the API (defaults to production Digitraffic)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DigitrafficConfig {
    /// Create a new config with the given user identification.
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for DigitrafficConfig {
    fn default() -> Self {
        Self::new(DEFAULT_USER)
    }
}

/// Digitraffic rail API client.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct DigitrafficClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl DigitrafficClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DigitrafficConfig) -> Result<Self, DigitrafficError> {
        let mut headers = HeaderMap::new();

        let user = HeaderValue::from_str(&config.user).map_err(|_| DigitrafficError::Api {
            status: 0,
            message: "Invalid Digitraffic-User header value".to_string(),
        })?;
        headers.insert(HeaderName::from_static("digitraffic-user"), user);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Fetch all stations from `/metadata/stations`.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, DigitrafficError> {
        let url = stations_url(&self.base_url);
        let dtos: Vec<StationDto> = self.get_json(&url, &[]).await?;
        debug!(count = dtos.len(), "fetched station metadata");
        Ok(convert_stations(&dtos))
    }

    /// Fetch the live trains passing through a station.
    pub async fn fetch_live_trains(
        &self,
        station: &StationCode,
        query: LiveTrainsQuery,
    ) -> Result<Vec<Train>, DigitrafficError> {
        let url = live_trains_url(&self.base_url, station);
        let params = [
            ("arriving_trains", query.arriving_trains.to_string()),
            ("departing_trains", query.departing_trains.to_string()),
            ("include_nonstopping", query.include_nonstopping.to_string()),
        ];

        let dtos: Vec<TrainDto> = self.get_json(&url, &params).await?;
        debug!(station = %station, count = dtos.len(), "fetched live trains");
        Ok(convert_trains(&dtos))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, DigitrafficError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| DigitrafficError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self.http.get(url).query(params).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DigitrafficError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DigitrafficError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DigitrafficError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| DigitrafficError::Json {
            message: e.to_string(),
        })
    }
}

fn stations_url(base_url: &str) -> String {
    format!("{}/metadata/stations", base_url)
}

fn live_trains_url(base_url: &str, station: &StationCode) -> String {
    format!("{}/live-trains/station/{}", base_url, station.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = DigitrafficConfig::new("my-dashboard")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.user, "my-dashboard");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = DigitrafficConfig::default();

        assert_eq!(config.user, DEFAULT_USER);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn query_defaults() {
        let query = LiveTrainsQuery::default();
        assert_eq!(query.arriving_trains, 20);
        assert_eq!(query.departing_trains, 20);
        assert!(!query.include_nonstopping);
    }

    #[test]
    fn client_creation() {
        let client = DigitrafficClient::new(DigitrafficConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn invalid_user_header_rejected() {
        let client = DigitrafficClient::new(DigitrafficConfig::new("bad\nvalue"));
        assert!(client.is_err());
    }

    #[test]
    fn urls() {
        let psl = StationCode::parse("PSL").unwrap();
        assert_eq!(
            stations_url(DEFAULT_BASE_URL),
            "https://rata.digitraffic.fi/api/v1/metadata/stations"
        );
        assert_eq!(
            live_trains_url(DEFAULT_BASE_URL, &psl),
            "https://rata.digitraffic.fi/api/v1/live-trains/station/PSL"
        );
    }
}
