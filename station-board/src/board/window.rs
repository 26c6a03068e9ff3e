//! Schedule window engine.
//!
//! Turns the raw train list for a station into a board: trains with a stop
//! at the station within two hours either side of `now`, in chronological
//! order, classified as past or upcoming and annotated with delay and
//! destination.
//!
//! The engine is pure. `now` is always supplied by the caller, and all
//! station names come from the directory passed in.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::domain::{InvalidStationCode, StationCode, TimetableRow, Train};
use crate::stations::StationDirectory;

use super::view::{Board, BoardEntry, DelayStatus, TimeWindow};

/// Half-width of the board window, in hours.
pub const WINDOW_HOURS: i64 = 2;

/// Errors from board computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The queried station code is empty or malformed
    #[error(transparent)]
    InvalidStationCode(#[from] InvalidStationCode),
}

/// Compute the board for `station_code` at `now`.
///
/// Fails only when `station_code` is empty or whitespace. Any other text is
/// matched against timetable rows by plain equality, so a code in the wrong
/// case gives an empty board. No trains, or no trains in the window, also
/// give an empty board. Whether the code belongs to a known station is not
/// checked here; the destination lookup simply falls back to raw codes.
///
/// Times on the board are expressed in the offset of `now`.
pub fn compute_window(
    now: DateTime<FixedOffset>,
    station_code: &str,
    trains: &[Train],
    directory: &StationDirectory,
) -> Result<Board, BoardError> {
    let station = StationCode::parse_query(station_code)?;
    Ok(compute_board(now, &station, trains, directory))
}

/// Compute the board for an already validated station code.
pub fn compute_board(
    now: DateTime<FixedOffset>,
    station: &StationCode,
    trains: &[Train],
    directory: &StationDirectory,
) -> Board {
    let half_width = Duration::hours(WINDOW_HOURS);
    let window = TimeWindow {
        start: now - half_width,
        end: now + half_width,
    };

    let start = window.start.with_timezone(&Utc);
    let end = window.end.with_timezone(&Utc);

    let mut qualifying: Vec<(&Train, Option<DateTime<Utc>>)> = trains
        .iter()
        .filter(|t| t.rows.iter().any(|r| r.is_at_within(station, start, end)))
        .map(|t| (t, reference_time(t, station)))
        .collect();

    // Stable: trains with equal reference times keep their feed order
    qualifying.sort_by_key(|(_, reference)| reference.unwrap_or(DateTime::<Utc>::UNIX_EPOCH));

    let entries = qualifying
        .into_iter()
        .map(|(train, reference)| build_entry(train, station, reference, now, directory))
        .collect();

    Board {
        station: station.clone(),
        now,
        window,
        entries,
    }
}

/// Departure time at the station if the train departs there, else arrival.
fn reference_time(train: &Train, station: &StationCode) -> Option<DateTime<Utc>> {
    train
        .departure_at(station)
        .or_else(|| train.arrival_at(station))
        .map(|r| r.scheduled_time)
}

/// Departure delay if reported, else arrival delay, else zero.
fn resolve_delay(departure: Option<&TimetableRow>, arrival: Option<&TimetableRow>) -> i32 {
    departure
        .and_then(|r| r.difference_in_minutes)
        .or_else(|| arrival.and_then(|r| r.difference_in_minutes))
        .unwrap_or(0)
}

fn build_entry(
    train: &Train,
    station: &StationCode,
    reference: Option<DateTime<Utc>>,
    now: DateTime<FixedOffset>,
    directory: &StationDirectory,
) -> BoardEntry {
    let offset = now.timezone();
    let local = |t: DateTime<Utc>| t.with_timezone(&offset);

    let arrival = train.arrival_at(station);
    let departure = train.departure_at(station);

    let scheduled_arrival = arrival.map(|r| local(r.scheduled_time));
    let scheduled_departure = departure.map(|r| local(r.scheduled_time));

    let delay_minutes = resolve_delay(departure, arrival);

    let (destination_code, destination_name) = match train.destination() {
        Some(code) => (code.as_str().to_string(), directory.name_or_code(code)),
        None => (String::new(), String::new()),
    };

    let reference_row = departure.or(arrival);

    BoardEntry {
        train_number: train.train_number,
        display_name: train.display_name(),
        destination_code,
        destination_name,
        arrival: scheduled_arrival.map(|t| format_hhmm(&t)),
        departure: scheduled_departure.map(|t| format_hhmm(&t)),
        scheduled_arrival,
        scheduled_departure,
        reference_time: reference.map(local),
        delay_minutes,
        delay_status: DelayStatus::from_minutes(delay_minutes),
        is_past: reference.is_some_and(|r| r < now.with_timezone(&Utc)),
        platform: reference_row.and_then(|r| r.track.clone()),
        is_cancelled: train.cancelled || reference_row.is_some_and(|r| r.cancelled),
    }
}

fn format_hhmm(t: &DateTime<FixedOffset>) -> String {
    t.format("%H:%M").to_string()
}
