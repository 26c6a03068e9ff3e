//! Application state for the web layer.

use std::sync::Arc;

use crate::board::BoardConfig;
use crate::preferences::PreferenceStore;
use crate::refresh::LiveBoard;
use crate::source::DataSource;
use crate::stations::StationRegistry;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Live or fixture train data
    pub source: DataSource,

    /// Station directory, refreshed in the background
    pub stations: StationRegistry,

    /// Refresh cycle for the watched station
    pub live: Arc<LiveBoard>,

    /// Persisted user preferences
    pub preferences: Arc<PreferenceStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        source: DataSource,
        stations: StationRegistry,
        preferences: PreferenceStore,
        config: BoardConfig,
    ) -> Self {
        let live = LiveBoard::new(source.clone(), stations.clone(), config);
        Self::with_live_board(source, stations, preferences, live)
    }

    /// Create an app state around an existing live board.
    pub fn with_live_board(
        source: DataSource,
        stations: StationRegistry,
        preferences: PreferenceStore,
        live: LiveBoard,
    ) -> Self {
        Self {
            source,
            stations,
            live: Arc::new(live),
            preferences: Arc::new(preferences),
        }
    }

    /// Board configuration of the live refresh cycle.
    pub fn config(&self) -> &BoardConfig {
        self.live.config()
    }
}
