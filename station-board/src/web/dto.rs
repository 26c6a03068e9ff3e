//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardEntry};
use crate::domain::Station;
use crate::preferences::Theme;
use crate::refresh::LiveSnapshot;

use super::maps::maps_search_url;

/// Request to search stations by name.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Substring of the station name
    #[serde(default)]
    pub q: String,

    /// Maximum number of results (capped at 50)
    pub limit: Option<usize>,
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationSearchResult {
    pub code: String,
    pub name: String,
    pub passenger_traffic: bool,
}

impl StationSearchResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            code: station.short_code.as_str().to_string(),
            name: station.name.clone(),
            passenger_traffic: station.passenger_traffic,
        }
    }
}

/// Response for station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationSearchResult>,
}

/// Request to show the board for a station.
///
/// `q` is free text typed by the user; `selected` is the name picked from
/// the station list, if any.
#[derive(Debug, Default, Deserialize)]
pub struct BoardRequest {
    #[serde(default)]
    pub q: String,

    pub selected: Option<String>,
}

/// A station reference in responses.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub code: String,
    pub name: String,
}

/// One train on the board.
#[derive(Debug, Serialize)]
pub struct BoardEntryResult {
    pub train_number: u32,

    /// Commuter line or "{type} {number}"
    pub name: String,

    pub destination: StationResult,

    /// Map search link for the destination
    pub destination_url: String,

    /// Scheduled arrival as "HH:MM"
    pub arrival: Option<String>,

    /// Scheduled departure as "HH:MM"
    pub departure: Option<String>,

    /// Reference time as RFC 3339
    pub reference_time: Option<String>,

    pub delay_minutes: i32,

    /// "ON_TIME" or "DELAYED"
    pub status: String,

    pub is_past: bool,
    pub platform: Option<String>,
    pub is_cancelled: bool,
}

impl BoardEntryResult {
    /// Create from a board entry.
    pub fn from_entry(entry: &BoardEntry) -> Self {
        Self {
            train_number: entry.train_number,
            name: entry.display_name.clone(),
            destination: StationResult {
                code: entry.destination_code.clone(),
                name: entry.destination_name.clone(),
            },
            destination_url: maps_search_url(&entry.destination_name),
            arrival: entry.arrival.clone(),
            departure: entry.departure.clone(),
            reference_time: entry.reference_time.map(|t| t.to_rfc3339()),
            delay_minutes: entry.delay_minutes,
            status: entry.delay_status.as_str().to_string(),
            is_past: entry.is_past,
            platform: entry.platform.clone(),
            is_cancelled: entry.is_cancelled,
        }
    }
}

/// Response for a station board.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub station: StationResult,

    /// Instant the board was computed for, RFC 3339
    pub now: String,
    pub window_start: String,
    pub window_end: String,

    /// Trains still to come, in chronological order
    pub upcoming: Vec<BoardEntryResult>,

    /// Trains already gone, in chronological order
    pub past: Vec<BoardEntryResult>,

    /// Set when the board has no trains
    pub message: Option<String>,

    /// Last refresh failure, if the board may be stale
    pub last_error: Option<String>,
}

impl BoardResponse {
    /// Create from a computed board.
    pub fn from_board(station: &Station, board: &Board) -> Self {
        Self {
            station: StationResult {
                code: station.short_code.as_str().to_string(),
                name: station.name.clone(),
            },
            now: board.now.to_rfc3339(),
            window_start: board.window.start.to_rfc3339(),
            window_end: board.window.end.to_rfc3339(),
            upcoming: board.upcoming().map(BoardEntryResult::from_entry).collect(),
            past: board.past().map(BoardEntryResult::from_entry).collect(),
            message: board.is_empty().then(|| empty_board_message(&station.name)),
            last_error: None,
        }
    }

    /// Create from the live board's latest snapshot.
    pub fn from_snapshot(snapshot: &LiveSnapshot) -> Self {
        Self {
            last_error: snapshot.last_error.clone(),
            ..Self::from_board(&snapshot.station, &snapshot.board)
        }
    }
}

/// Message shown when a station has no trains in the window.
pub fn empty_board_message(station_name: &str) -> String {
    format!("No trains found for {station_name} in this time window.")
}

/// Response after changing the theme.
#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: String,

    /// Toggle button label for the new theme
    pub label: String,
}

impl From<Theme> for ThemeResponse {
    fn from(theme: Theme) -> Self {
        Self {
            theme: theme.as_str().to_string(),
            label: theme.icon().to_string(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
