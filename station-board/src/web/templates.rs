//! Askama templates for the web frontend.

use askama::Template;

use crate::board::{Board, BoardEntry, WINDOW_HOURS};
use crate::domain::Station;
use crate::preferences::Theme;
use crate::refresh::LiveSnapshot;

use super::dto::empty_board_message;
use super::maps::maps_search_url;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the station picker.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub theme: String,
    /// Current theme shown on the toggle button
    pub theme_label: String,
    /// Placeholder option of the station picker
    pub placeholder: String,
    pub stations: Vec<StationOption>,
    /// Seconds between live board polls
    pub refresh_secs: u64,
    /// Serving fixture data instead of the live API
    pub is_mock: bool,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Station board fragment.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub board: BoardView,
}

/// Inline message fragment (validation and fetch errors).
#[derive(Template)]
#[template(path = "message.html")]
pub struct MessageTemplate {
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Entry in the station picker.
#[derive(Debug, Clone)]
pub struct StationOption {
    pub code: String,
    pub name: String,
}

impl StationOption {
    pub fn from_station(station: &Station) -> Self {
        Self {
            code: station.short_code.as_str().to_string(),
            name: station.name.clone(),
        }
    }
}

/// Board view model for templates.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub station_name: String,
    pub station_code: String,
    /// Half-width of the window in minutes
    pub window_mins: i64,
    /// e.g. "08:00 – 12:00"
    pub window_range: String,
    /// Time of computation as "HH:MM:SS"
    pub updated_at: String,
    pub upcoming: Vec<EntryView>,
    pub past: Vec<EntryView>,
    pub empty_message: Option<String>,
    pub last_error: Option<String>,
}

impl BoardView {
    /// Create from a computed board.
    pub fn from_board(station: &Station, board: &Board) -> Self {
        Self {
            station_name: station.name.clone(),
            station_code: station.short_code.as_str().to_string(),
            window_mins: WINDOW_HOURS * 60,
            window_range: format!(
                "{} – {}",
                board.window.start.format("%H:%M"),
                board.window.end.format("%H:%M")
            ),
            updated_at: board.now.format("%H:%M:%S").to_string(),
            upcoming: board.upcoming().map(EntryView::from_entry).collect(),
            past: board.past().map(EntryView::from_entry).collect(),
            empty_message: board.is_empty().then(|| empty_board_message(&station.name)),
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

    /// Use the configured window width in the header.
    pub fn with_window_mins(mut self, window_mins: i64) -> Self {
        self.window_mins = window_mins;
        self
    }

    /// Header text, e.g. "±120 min, 08:00 – 12:00".
    pub fn window_text(&self) -> String {
        format!("±{} min, {}", self.window_mins, self.window_range)
    }

    pub fn has_past(&self) -> bool {
        !self.past.is_empty()
    }
}

/// Board row view model.
#[derive(Debug, Clone)]
pub struct EntryView {
    pub name: String,
    pub destination: String,
    pub destination_url: String,
    pub arrival: String,
    pub departure: String,
    pub status_text: String,
    pub status_class: String,
    pub platform: Option<String>,
    pub is_cancelled: bool,
}

impl EntryView {
    /// Create from a board entry.
    pub fn from_entry(entry: &BoardEntry) -> Self {
        Self {
            name: entry.display_name.clone(),
            destination: entry.destination_name.clone(),
            destination_url: maps_search_url(&entry.destination_name),
            arrival: entry.arrival_display().to_string(),
            departure: entry.departure_display().to_string(),
            status_text: entry.status_text(),
            status_class: entry.delay_status.css_class().to_string(),
            platform: entry.platform.clone(),
            is_cancelled: entry.is_cancelled,
        }
    }
}

/// Body class for a theme.
pub fn theme_class(theme: Theme) -> String {
    format!("theme-{theme}")
}
