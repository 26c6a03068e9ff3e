//! Unit tests for the schedule window engine.

use super::*;
use crate::domain::{RowType, Station, StationCode, TimetableRow, Train};
use crate::stations::StationDirectory;
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

fn code(s: &str) -> StationCode {
    StationCode::parse(s).unwrap()
}

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, h, m, 0).unwrap()
}

/// 10:00 UTC, expressed in UTC.
fn now() -> DateTime<FixedOffset> {
    at(10, 0).fixed_offset()
}

fn arr(station: &str, h: u32, m: u32) -> TimetableRow {
    TimetableRow::new(code(station), RowType::Arrival, at(h, m))
}

fn dep(station: &str, h: u32, m: u32) -> TimetableRow {
    TimetableRow::new(code(station), RowType::Departure, at(h, m))
}

fn directory() -> StationDirectory {
    StationDirectory::new(vec![
        Station::new("Helsinki asema", code("HKI")),
        Station::new("Pasila asema", code("PSL")),
        Station::new("Tampere asema", code("TPE")),
    ])
}

fn numbers(board: &Board) -> Vec<u32> {
    board.entries.iter().map(|e| e.train_number).collect()
}

#[test]
fn scenario_past_and_upcoming() {
    let a = Train::new(
        1,
        "IC",
        vec![dep("HKI", 9, 20), arr("PSL", 9, 25), dep("PSL", 9, 30).with_difference(5), arr("TPE", 11, 0)],
    );
    let b = Train::new(
        2,
        "IC",
        vec![dep("PSL", 11, 0).with_difference(0), arr("TPE", 12, 30)],
    );

    let board = compute_window(now(), "PSL", &[b, a], &directory()).unwrap();

    assert_eq!(board.window.start, at(8, 0));
    assert_eq!(board.window.end, at(12, 0));
    assert_eq!(numbers(&board), vec![1, 2]);

    let a = &board.entries[0];
    assert!(a.is_past);
    assert_eq!(a.delay_minutes, 5);
    assert_eq!(a.delay_status, DelayStatus::Delayed);
    assert_eq!(a.departure.as_deref(), Some("09:30"));
    assert_eq!(a.arrival.as_deref(), Some("09:25"));

    let b = &board.entries[1];
    assert!(!b.is_past);
    assert_eq!(b.delay_minutes, 0);
    assert_eq!(b.delay_status, DelayStatus::OnTime);
    assert_eq!(b.arrival_display(), NO_TIME);
    assert_eq!(b.departure_display(), "11:00");
}

#[test]
fn arrival_only_train_uses_arrival_as_reference() {
    let c = Train::new(3, "S", vec![dep("TPE", 7, 30), arr("HKI", 9, 0)]);

    let board = compute_window(now(), "HKI", &[c], &directory()).unwrap();

    assert_eq!(board.entries.len(), 1);
    let entry = &board.entries[0];
    assert!(entry.is_past);
    assert_eq!(entry.reference_time, Some(at(9, 0).fixed_offset()));
    assert_eq!(entry.departure, None);
}

#[test]
fn empty_train_list_gives_empty_board() {
    let board = compute_window(now(), "HKI", &[], &directory()).unwrap();
    assert!(board.is_empty());
    assert!(!board.has_past());
    assert_eq!(board.upcoming().count(), 0);
}

#[test]
fn unknown_destination_uses_raw_code() {
    let train = Train::new(4, "P", vec![dep("HKI", 10, 30), arr("XYZ", 11, 45)]);

    let board = compute_window(now(), "HKI", &[train], &directory()).unwrap();

    assert_eq!(board.entries[0].destination_code, "XYZ");
    assert_eq!(board.entries[0].destination_name, "XYZ");
}

#[test]
fn known_destination_uses_station_name() {
    let train = Train::new(5, "IC", vec![dep("HKI", 10, 30), arr("PSL", 10, 35), arr("TPE", 12, 15)]);

    let board = compute_window(now(), "HKI", &[train], &directory()).unwrap();

    // The last row wins, not the first later stop
    assert_eq!(board.entries[0].destination_name, "Tampere asema");
}

#[test]
fn empty_station_code_is_error() {
    let result = compute_window(now(), "", &[], &directory());
    assert!(matches!(result, Err(BoardError::InvalidStationCode(_))));
}

#[test]
fn whitespace_station_code_is_error() {
    let result = compute_window(now(), "   ", &[], &directory());
    assert!(matches!(result, Err(BoardError::InvalidStationCode(_))));
}

#[test]
fn lowercase_station_code_matches_nothing() {
    let train = Train::new(7, "IC", vec![dep("HKI", 10, 30), arr("TPE", 12, 0)]);

    let board = compute_window(now(), "hki", &[train.clone()], &directory()).unwrap();
    assert!(board.is_empty());
    assert_eq!(board.station.as_str(), "hki");

    let board = compute_window(now(), "HKI", &[train], &directory()).unwrap();
    assert_eq!(numbers(&board), vec![7]);
}

#[test]
fn unknown_station_code_is_not_an_error() {
    let board = compute_window(now(), "NOPE", &[], &directory()).unwrap();
    assert!(board.is_empty());
    assert_eq!(board.station.as_str(), "NOPE");
}

#[test]
fn window_bounds_are_inclusive() {
    let trains = vec![
        Train::new(10, "IC", vec![dep("HKI", 7, 59), arr("TPE", 9, 40)]),
        Train::new(11, "IC", vec![dep("HKI", 8, 0), arr("TPE", 9, 41)]),
        Train::new(12, "IC", vec![dep("HKI", 12, 0), arr("TPE", 13, 40)]),
        Train::new(13, "IC", vec![dep("HKI", 12, 1), arr("TPE", 13, 41)]),
    ];

    let board = compute_window(now(), "HKI", &trains, &directory()).unwrap();
    assert_eq!(numbers(&board), vec![11, 12]);
}

#[test]
fn rows_at_other_stations_do_not_qualify() {
    // Stops at PSL inside the window, but at HKI only long before it
    let train = Train::new(20, "IC", vec![dep("HKI", 6, 0), arr("PSL", 10, 0), arr("TPE", 11, 0)]);

    let board = compute_window(now(), "HKI", &[train], &directory()).unwrap();
    assert!(board.is_empty());
}

#[test]
fn any_row_in_window_qualifies_train() {
    // Arrives inside the window, departs after it; the departure is still the reference
    let train = Train::new(21, "IC", vec![arr("PSL", 11, 59), dep("PSL", 12, 5), arr("TPE", 13, 30)]);

    let board = compute_window(now(), "PSL", &[train], &directory()).unwrap();

    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].reference_time, Some(at(12, 5).fixed_offset()));
    assert!(!board.entries[0].is_past);
}

#[test]
fn sorting_prefers_departure_over_arrival() {
    let x = Train::new(30, "IC", vec![arr("PSL", 10, 10), dep("PSL", 10, 40), arr("TPE", 12, 0)]);
    let y = Train::new(31, "IC", vec![dep("PSL", 10, 20), arr("TPE", 11, 50)]);

    let board = compute_window(now(), "PSL", &[x, y], &directory()).unwrap();
    assert_eq!(numbers(&board), vec![31, 30]);
}

#[test]
fn equal_reference_times_keep_input_order() {
    let trains = vec![
        Train::new(40, "IC", vec![dep("HKI", 10, 30), arr("TPE", 12, 0)]),
        Train::new(41, "S", vec![dep("HKI", 10, 30), arr("TPE", 12, 5)]),
        Train::new(42, "P", vec![dep("HKI", 10, 15), arr("PSL", 10, 20)]),
    ];

    let board = compute_window(now(), "HKI", &trains, &directory()).unwrap();
    assert_eq!(numbers(&board), vec![42, 40, 41]);
}

#[test]
fn reference_equal_to_now_is_upcoming() {
    let train = Train::new(50, "IC", vec![dep("HKI", 10, 0), arr("TPE", 11, 40)]);

    let board = compute_window(now(), "HKI", &[train], &directory()).unwrap();
    assert!(!board.entries[0].is_past);
}

#[test]
fn departure_delay_preferred_over_arrival_delay() {
    let train = Train::new(
        60,
        "IC",
        vec![arr("PSL", 10, 10).with_difference(7), dep("PSL", 10, 12).with_difference(3), arr("TPE", 11, 40)],
    );

    let board = compute_window(now(), "PSL", &[train], &directory()).unwrap();
    assert_eq!(board.entries[0].delay_minutes, 3);
}

#[test]
fn arrival_delay_used_when_departure_has_none() {
    let train = Train::new(
        61,
        "IC",
        vec![arr("PSL", 10, 10).with_difference(7), dep("PSL", 10, 12), arr("TPE", 11, 40)],
    );

    let board = compute_window(now(), "PSL", &[train], &directory()).unwrap();
    assert_eq!(board.entries[0].delay_minutes, 7);
    assert_eq!(board.entries[0].delay_status, DelayStatus::Delayed);
}

#[test]
fn reported_zero_departure_delay_wins() {
    let train = Train::new(
        62,
        "IC",
        vec![arr("PSL", 10, 10).with_difference(4), dep("PSL", 10, 12).with_difference(0), arr("TPE", 11, 40)],
    );

    let board = compute_window(now(), "PSL", &[train], &directory()).unwrap();
    assert_eq!(board.entries[0].delay_minutes, 0);
    assert_eq!(board.entries[0].delay_status, DelayStatus::OnTime);
}

#[test]
fn early_running_is_on_time() {
    let train = Train::new(63, "IC", vec![dep("HKI", 10, 30).with_difference(-2), arr("TPE", 12, 0)]);

    let board = compute_window(now(), "HKI", &[train], &directory()).unwrap();
    assert_eq!(board.entries[0].delay_minutes, -2);
    assert_eq!(board.entries[0].delay_status, DelayStatus::OnTime);
    assert_eq!(board.entries[0].status_text(), "On time");
}

#[test]
fn missing_delay_is_zero() {
    let train = Train::new(64, "IC", vec![dep("HKI", 10, 30), arr("TPE", 12, 0)]);

    let board = compute_window(now(), "HKI", &[train], &directory()).unwrap();
    assert_eq!(board.entries[0].delay_minutes, 0);
}

#[test]
fn display_name_prefers_commuter_line() {
    let trains = vec![
        Train::new(8571, "HL", vec![dep("HKI", 10, 5), arr("PSL", 10, 10)]).with_commuter_line("P"),
        Train::new(27, "IC", vec![dep("HKI", 10, 6), arr("TPE", 11, 50)]),
    ];

    let board = compute_window(now(), "HKI", &trains, &directory()).unwrap();
    assert_eq!(board.entries[0].display_name, "P");
    assert_eq!(board.entries[1].display_name, "IC 27");
}

#[test]
fn times_are_formatted_in_offset_of_now() {
    let helsinki = FixedOffset::east_opt(3 * 3600).unwrap();
    let now = at(10, 0).with_timezone(&helsinki);
    let train = Train::new(70, "IC", vec![dep("HKI", 9, 30), arr("TPE", 11, 20)]);

    let board = compute_window(now, "HKI", &[train], &directory()).unwrap();

    assert_eq!(board.entries[0].departure.as_deref(), Some("12:30"));
    assert_eq!(board.window.start.format("%H:%M").to_string(), "11:00");
    assert_eq!(board.window.end.format("%H:%M").to_string(), "15:00");
}

#[test]
fn partitions_keep_chronological_order() {
    let trains = vec![
        Train::new(80, "IC", vec![dep("HKI", 11, 0), arr("TPE", 12, 40)]),
        Train::new(81, "IC", vec![dep("HKI", 8, 30), arr("TPE", 10, 10)]),
        Train::new(82, "IC", vec![dep("HKI", 10, 30), arr("TPE", 12, 10)]),
        Train::new(83, "IC", vec![dep("HKI", 9, 45), arr("TPE", 11, 25)]),
    ];

    let board = compute_window(now(), "HKI", &trains, &directory()).unwrap();

    assert_eq!(numbers(&board), vec![81, 83, 82, 80]);
    let past: Vec<u32> = board.past().map(|e| e.train_number).collect();
    let upcoming: Vec<u32> = board.upcoming().map(|e| e.train_number).collect();
    assert_eq!(past, vec![81, 83]);
    assert_eq!(upcoming, vec![82, 80]);
    assert!(board.has_past());
}

#[test]
fn platform_and_cancellation_pass_through() {
    let mut departure = dep("HKI", 10, 30);
    departure.track = Some("8".to_string());
    departure.cancelled = true;
    let train = Train::new(90, "IC", vec![departure, arr("TPE", 12, 0)]);

    let board = compute_window(now(), "HKI", &[train], &directory()).unwrap();

    assert_eq!(board.entries[0].platform.as_deref(), Some("8"));
    assert!(board.entries[0].is_cancelled);
    // Cancellation does not affect delay status
    assert_eq!(board.entries[0].delay_status, DelayStatus::OnTime);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// (arrival offset, departure offset, delay) at HKI, minutes from now.
    type TrainCase = (Option<i64>, Option<i64>, Option<i32>);

    fn train_case() -> impl Strategy<Value = TrainCase> {
        (
            proptest::option::of(-300i64..300),
            proptest::option::of(-300i64..300),
            proptest::option::of(-10i32..30),
        )
    }

    fn build(cases: &[TrainCase]) -> Vec<Train> {
        let base = at(10, 0);
        cases
            .iter()
            .enumerate()
            .map(|(i, (arr_off, dep_off, delay))| {
                let mut rows = vec![TimetableRow::new(
                    code("TPE"),
                    RowType::Departure,
                    base - Duration::minutes(400),
                )];
                if let Some(off) = arr_off {
                    let mut row =
                        TimetableRow::new(code("HKI"), RowType::Arrival, base + Duration::minutes(*off));
                    row.difference_in_minutes = *delay;
                    rows.push(row);
                }
                if let Some(off) = dep_off {
                    let mut row =
                        TimetableRow::new(code("HKI"), RowType::Departure, base + Duration::minutes(*off));
                    row.difference_in_minutes = *delay;
                    rows.push(row);
                }
                rows.push(TimetableRow::new(
                    code("PSL"),
                    RowType::Arrival,
                    base + Duration::minutes(400),
                ));
                Train::new(i as u32, "IC", rows)
            })
            .collect()
    }

    fn in_window(off: &Option<i64>) -> bool {
        off.is_some_and(|m| (-120..=120).contains(&m))
    }

    proptest! {
        /// Exactly the trains with an HKI row inside the window appear
        #[test]
        fn inclusion_matches_window(cases in proptest::collection::vec(train_case(), 0..20)) {
            let trains = build(&cases);
            let board = compute_window(now(), "HKI", &trains, &directory()).unwrap();

            let mut expected: Vec<u32> = cases
                .iter()
                .enumerate()
                .filter(|(_, (a, d, _))| in_window(a) || in_window(d))
                .map(|(i, _)| i as u32)
                .collect();
            let mut actual = numbers(&board);
            expected.sort();
            actual.sort();
            prop_assert_eq!(actual, expected);
        }

        /// Entries never go backwards in time
        #[test]
        fn entries_are_sorted(cases in proptest::collection::vec(train_case(), 0..20)) {
            let trains = build(&cases);
            let board = compute_window(now(), "HKI", &trains, &directory()).unwrap();

            for pair in board.entries.windows(2) {
                prop_assert!(pair[0].reference_time <= pair[1].reference_time);
            }
        }

        /// Past iff the reference time is strictly before now
        #[test]
        fn past_classification(cases in proptest::collection::vec(train_case(), 0..20)) {
            let trains = build(&cases);
            let now = now();
            let board = compute_window(now, "HKI", &trains, &directory()).unwrap();

            for entry in &board.entries {
                let expected = entry.reference_time.is_some_and(|r| r < now);
                prop_assert_eq!(entry.is_past, expected);
            }
        }

        /// Delayed iff the resolved delay is strictly positive
        #[test]
        fn delay_status_rule(cases in proptest::collection::vec(train_case(), 0..20)) {
            let trains = build(&cases);
            let board = compute_window(now(), "HKI", &trains, &directory()).unwrap();

            for entry in &board.entries {
                prop_assert_eq!(
                    entry.delay_status == DelayStatus::Delayed,
                    entry.delay_minutes > 0
                );
            }
        }
    }
}
