//! Data source selection.
//!
//! The web layer and the refresh task talk to `DataSource`, which is either
//! the cached Digitraffic client or the fixture-backed mock.

use std::sync::Arc;

use crate::cache::CachedDigitrafficClient;
use crate::digitraffic::{DigitrafficError, LiveTrainsQuery, MockDigitrafficClient};
use crate::domain::{Station, StationCode, Train};

/// Where station metadata and live trains come from.
#[derive(Clone)]
pub enum DataSource {
    Live(Arc<CachedDigitrafficClient>),
    Mock(MockDigitrafficClient),
}

impl DataSource {
    /// Fetch the full station feed.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, DigitrafficError> {
        match self {
            DataSource::Live(client) => client.fetch_stations().await,
            DataSource::Mock(mock) => mock.fetch_stations().await,
        }
    }

    /// Fetch trains passing through `station`.
    pub async fn fetch_live_trains(
        &self,
        station: &StationCode,
        query: LiveTrainsQuery,
    ) -> Result<Arc<Vec<Train>>, DigitrafficError> {
        match self {
            DataSource::Live(client) => client.fetch_live_trains(station, query).await,
            DataSource::Mock(mock) => mock.fetch_live_trains(station).await.map(Arc::new),
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, DataSource::Mock(_))
    }
}

impl From<CachedDigitrafficClient> for DataSource {
    fn from(client: CachedDigitrafficClient) -> Self {
        DataSource::Live(Arc::new(client))
    }
}

impl From<MockDigitrafficClient> for DataSource {
    fn from(mock: MockDigitrafficClient) -> Self {
        DataSource::Mock(mock)
    }
}
