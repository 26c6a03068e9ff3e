//! Board view model produced by the schedule window engine.

use chrono::{DateTime, FixedOffset};

use crate::domain::StationCode;

/// Marker shown in place of a missing arrival or departure time.
pub const NO_TIME: &str = "—";

/// Whether a train is running late.
///
/// Early running (negative delay) counts as on time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelayStatus {
    OnTime,
    Delayed,
}

impl DelayStatus {
    /// Delayed iff the delay is strictly positive.
    pub fn from_minutes(delay_minutes: i32) -> Self {
        if delay_minutes > 0 {
            DelayStatus::Delayed
        } else {
            DelayStatus::OnTime
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DelayStatus::OnTime => "ON_TIME",
            DelayStatus::Delayed => "DELAYED",
        }
    }

    /// CSS class used by the templates.
    pub fn css_class(&self) -> &'static str {
        match self {
            DelayStatus::OnTime => "on-time",
            DelayStatus::Delayed => "delayed",
        }
    }
}

/// The time range a board covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

/// One train on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry {
    pub train_number: u32,
    /// Commuter line or "{type} {number}".
    pub display_name: String,
    /// Code of the train's final stop.
    pub destination_code: String,
    /// Name of the final stop, or its code when unknown.
    pub destination_name: String,
    pub scheduled_arrival: Option<DateTime<FixedOffset>>,
    pub scheduled_departure: Option<DateTime<FixedOffset>>,
    /// Departure if the train departs here, else arrival.
    pub reference_time: Option<DateTime<FixedOffset>>,
    /// Arrival as "HH:MM".
    pub arrival: Option<String>,
    /// Departure as "HH:MM".
    pub departure: Option<String>,
    pub delay_minutes: i32,
    pub delay_status: DelayStatus,
    pub is_past: bool,
    pub platform: Option<String>,
    pub is_cancelled: bool,
}

impl BoardEntry {
    /// Arrival time or the absent marker.
    pub fn arrival_display(&self) -> &str {
        self.arrival.as_deref().unwrap_or(NO_TIME)
    }

    /// Departure time or the absent marker.
    pub fn departure_display(&self) -> &str {
        self.departure.as_deref().unwrap_or(NO_TIME)
    }

    /// Human-readable status, e.g. "Delayed 5 min".
    pub fn status_text(&self) -> String {
        match self.delay_status {
            DelayStatus::Delayed => format!("Delayed {} min", self.delay_minutes),
            DelayStatus::OnTime => "On time".to_string(),
        }
    }
}

/// Computed board for one station at one instant.
///
/// `entries` holds every qualifying train in a single chronological order.
/// `upcoming` and `past` are filtered views over that order; neither is
/// re-sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub station: StationCode,
    pub now: DateTime<FixedOffset>,
    pub window: TimeWindow,
    pub entries: Vec<BoardEntry>,
}

impl Board {
    /// Trains whose reference time has not passed yet.
    pub fn upcoming(&self) -> impl Iterator<Item = &BoardEntry> {
        self.entries.iter().filter(|e| !e.is_past)
    }

    /// Trains whose reference time is before `now`.
    pub fn past(&self) -> impl Iterator<Item = &BoardEntry> {
        self.entries.iter().filter(|e| e.is_past)
    }

    pub fn has_past(&self) -> bool {
        self.entries.iter().any(|e| e.is_past)
    }

    /// No trains in the window. A valid state, not an error.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
