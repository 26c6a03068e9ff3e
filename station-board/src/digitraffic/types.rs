//! Digitraffic API response DTOs.
//!
//! These types map directly to the Digitraffic rail JSON API responses.
//! Only the fields the board uses are declared; serde ignores the rest.

use serde::{Deserialize, Serialize};

/// Station from `GET /metadata/stations`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub station_name: String,
    pub station_short_code: String,
    #[serde(default)]
    pub passenger_traffic: bool,
}

/// Train from `GET /live-trains/station/{code}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainDto {
    pub train_number: u32,

    /// Category such as "IC", "S", "HL".
    pub train_type: String,

    /// Commuter line letter. Empty string for long-distance trains.
    #[serde(rename = "commuterLineID")]
    pub commuter_line_id: Option<String>,

    #[serde(default)]
    pub cancelled: bool,

    #[serde(default)]
    pub time_table_rows: Vec<TimeTableRowDto>,
}

/// A single arrival or departure in a train's route.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTableRowDto {
    pub station_short_code: String,

    /// "ARRIVAL" or "DEPARTURE".
    #[serde(rename = "type")]
    pub row_type: String,

    /// RFC 3339 timestamp, e.g. "2024-05-10T07:30:00.000Z".
    pub scheduled_time: String,

    /// Signed delay in minutes; absent until the train has live data.
    pub difference_in_minutes: Option<i32>,

    /// Platform.
    pub commercial_track: Option<String>,

    #[serde(default)]
    pub cancelled: bool,
}
