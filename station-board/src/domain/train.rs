//! Trains and their timetable rows.

use std::fmt;

use chrono::{DateTime, Utc};

use super::StationCode;

/// Whether a timetable row is an arrival or a departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowType {
    Arrival,
    Departure,
}

impl RowType {
    /// Parse the wire representation ("ARRIVAL" / "DEPARTURE").
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ARRIVAL" => Some(RowType::Arrival),
            "DEPARTURE" => Some(RowType::Departure),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RowType::Arrival => "ARRIVAL",
            RowType::Departure => "DEPARTURE",
        }
    }
}

impl fmt::Display for RowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single scheduled event for a train at a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableRow {
    /// Station this row applies to.
    pub station: StationCode,
    pub row_type: RowType,
    /// Scheduled instant of the arrival or departure.
    pub scheduled_time: DateTime<Utc>,
    /// Signed delay relative to schedule, in minutes.
    pub difference_in_minutes: Option<i32>,
    /// Platform, when published.
    pub track: Option<String>,
    pub cancelled: bool,
}

impl TimetableRow {
    /// Create a row with no delay, platform or cancellation data.
    pub fn new(station: StationCode, row_type: RowType, scheduled_time: DateTime<Utc>) -> Self {
        Self {
            station,
            row_type,
            scheduled_time,
            difference_in_minutes: None,
            track: None,
            cancelled: false,
        }
    }

    /// Builder-style setter for the delay.
    pub fn with_difference(mut self, minutes: i32) -> Self {
        self.difference_in_minutes = Some(minutes);
        self
    }

    /// Whether this row is at `station` and scheduled within `[start, end]`.
    pub fn is_at_within(
        &self,
        station: &StationCode,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> bool {
        &self.station == station && self.scheduled_time >= start && self.scheduled_time <= end
    }
}

/// A train and its full route.
///
/// `rows` are in journey order: the first row is the origin, the last row is
/// the final destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    pub train_number: u32,
    /// Category such as "IC", "S" or "HL".
    pub train_type: String,
    /// Commuter line letter ("P", "I", ...). Overrides the display name.
    pub commuter_line_id: Option<String>,
    pub cancelled: bool,
    pub rows: Vec<TimetableRow>,
}

impl Train {
    pub fn new(train_number: u32, train_type: impl Into<String>, rows: Vec<TimetableRow>) -> Self {
        Self {
            train_number,
            train_type: train_type.into(),
            commuter_line_id: None,
            cancelled: false,
            rows,
        }
    }

    /// Builder-style setter for the commuter line.
    pub fn with_commuter_line(mut self, line: impl Into<String>) -> Self {
        self.commuter_line_id = Some(line.into());
        self
    }

    /// First row of the given type at `station`.
    pub fn row_at(&self, station: &StationCode, row_type: RowType) -> Option<&TimetableRow> {
        self.rows
            .iter()
            .find(|r| &r.station == station && r.row_type == row_type)
    }

    /// Arrival row at `station`.
    pub fn arrival_at(&self, station: &StationCode) -> Option<&TimetableRow> {
        self.row_at(station, RowType::Arrival)
    }

    /// Departure row at `station`.
    pub fn departure_at(&self, station: &StationCode) -> Option<&TimetableRow> {
        self.row_at(station, RowType::Departure)
    }

    /// Station code of the last row, i.e. where the train terminates.
    pub fn destination(&self) -> Option<&StationCode> {
        self.rows.last().map(|r| &r.station)
    }

    /// Name shown to passengers: the commuter line if set, else type and number.
    pub fn display_name(&self) -> String {
        match self.commuter_line_id.as_deref() {
            Some(line) if !line.is_empty() => line.to_string(),
            _ => format!("{} {}", self.train_type, self.train_number),
        }
    }
}
