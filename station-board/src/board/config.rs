//! Board refresh and fetch configuration.

use std::time::Duration;

use crate::digitraffic::LiveTrainsQuery;

use super::window::WINDOW_HOURS;

/// Configuration for fetching and refreshing a station board.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Half-width of the board window in minutes, shown in the board header.
    pub window_mins: i64,

    /// How often the watched board is recomputed.
    pub refresh_interval: Duration,

    /// Arriving trains to request per fetch.
    pub arriving_trains: u16,

    /// Departing trains to request per fetch.
    pub departing_trains: u16,

    /// Whether to include trains that pass the station without stopping.
    pub include_nonstopping: bool,
}

impl BoardConfig {
    /// Set the refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// The live-trains request this configuration describes.
    pub fn live_trains_query(&self) -> LiveTrainsQuery {
        LiveTrainsQuery {
            arriving_trains: self.arriving_trains,
            departing_trains: self.departing_trains,
            include_nonstopping: self.include_nonstopping,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            window_mins: WINDOW_HOURS * 60,
            refresh_interval: Duration::from_secs(45),
            arriving_trains: 20,
            departing_trains: 20,
            include_nonstopping: false,
        }
    }
}
