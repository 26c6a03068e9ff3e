//! Conversion from Digitraffic DTOs to domain types.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::{DomainError, RowType, Station, StationCode, TimetableRow, Train};

use super::types::{StationDto, TimeTableRowDto, TrainDto};

/// Convert a station feed, skipping entries with unusable short codes.
pub fn convert_stations(stations: &[StationDto]) -> Vec<Station> {
    stations
        .iter()
        .filter_map(|dto| match convert_station(dto) {
            Ok(station) => Some(station),
            Err(e) => {
                warn!(name = %dto.station_name, error = %e, "skipping station");
                None
            }
        })
        .collect()
}

/// Convert a single station.
pub fn convert_station(dto: &StationDto) -> Result<Station, DomainError> {
    let short_code = StationCode::parse(&dto.station_short_code)?;
    Ok(Station {
        name: dto.station_name.clone(),
        short_code,
        passenger_traffic: dto.passenger_traffic,
    })
}

/// Convert a live-trains response.
///
/// Trains that fail validation are logged and skipped rather than failing
/// the whole response.
pub fn convert_trains(trains: &[TrainDto]) -> Vec<Train> {
    let mut results = Vec::with_capacity(trains.len());

    for dto in trains {
        match convert_train(dto) {
            Ok(train) => results.push(train),
            Err(e) => {
                warn!(train = dto.train_number, error = %e, "skipping train");
            }
        }
    }

    results
}

/// Convert a single train and its timetable rows.
pub fn convert_train(dto: &TrainDto) -> Result<Train, DomainError> {
    if dto.time_table_rows.is_empty() {
        return Err(DomainError::EmptyRoute(dto.train_number));
    }

    let rows = dto
        .time_table_rows
        .iter()
        .map(convert_row)
        .collect::<Result<Vec<_>, _>>()?;

    let commuter_line_id = dto
        .commuter_line_id
        .as_ref()
        .filter(|id| !id.is_empty())
        .cloned();

    Ok(Train {
        train_number: dto.train_number,
        train_type: dto.train_type.clone(),
        commuter_line_id,
        cancelled: dto.cancelled,
        rows,
    })
}

fn convert_row(dto: &TimeTableRowDto) -> Result<TimetableRow, DomainError> {
    let station = StationCode::parse(&dto.station_short_code)?;
    let row_type =
        RowType::parse(&dto.row_type).ok_or_else(|| DomainError::UnknownRowType(dto.row_type.clone()))?;
    let scheduled_time = parse_timestamp(&dto.scheduled_time)?;

    Ok(TimetableRow {
        station,
        row_type,
        scheduled_time,
        difference_in_minutes: dto.difference_in_minutes,
        track: dto.commercial_track.clone().filter(|t| !t.is_empty()),
        cancelled: dto.cancelled,
    })
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DomainError::InvalidTimestamp(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(code: &str, row_type: &str, time: &str) -> TimeTableRowDto {
        TimeTableRowDto {
            station_short_code: code.to_string(),
            row_type: row_type.to_string(),
            scheduled_time: time.to_string(),
            difference_in_minutes: None,
            commercial_track: None,
            cancelled: false,
        }
    }

    fn train(number: u32, rows: Vec<TimeTableRowDto>) -> TrainDto {
        TrainDto {
            train_number: number,
            train_type: "IC".to_string(),
            commuter_line_id: Some(String::new()),
            cancelled: false,
            time_table_rows: rows,
        }
    }

    #[test]
    fn parse_timestamp_with_millis() {
        let parsed = parse_timestamp("2024-05-10T07:30:00.000Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 10, 7, 30, 0).unwrap());
    }

    #[test]
    fn parse_timestamp_with_offset() {
        let parsed = parse_timestamp("2024-05-10T10:30:00+03:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 10, 7, 30, 0).unwrap());
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("10:30").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn converts_train() {
        let mut first = row("HKI", "DEPARTURE", "2024-05-10T07:30:00.000Z");
        first.difference_in_minutes = Some(3);
        first.commercial_track = Some("9".to_string());
        let dto = train(
            27,
            vec![first, row("TPE", "ARRIVAL", "2024-05-10T09:20:00.000Z")],
        );

        let train = convert_train(&dto).unwrap();
        assert_eq!(train.train_number, 27);
        assert_eq!(train.commuter_line_id, None);
        assert_eq!(train.rows.len(), 2);
        assert_eq!(train.rows[0].row_type, RowType::Departure);
        assert_eq!(train.rows[0].difference_in_minutes, Some(3));
        assert_eq!(train.rows[0].track.as_deref(), Some("9"));
        assert_eq!(train.destination().unwrap().as_str(), "TPE");
    }

    #[test]
    fn rejects_unknown_row_type() {
        let dto = train(1, vec![row("HKI", "PASS", "2024-05-10T07:30:00.000Z")]);
        assert!(matches!(
            convert_train(&dto),
            Err(DomainError::UnknownRowType(t)) if t == "PASS"
        ));
    }

    #[test]
    fn rejects_empty_route() {
        let dto = train(5, vec![]);
        assert!(matches!(convert_train(&dto), Err(DomainError::EmptyRoute(5))));
    }

    #[test]
    fn convert_trains_skips_invalid() {
        let good = train(1, vec![row("HKI", "DEPARTURE", "2024-05-10T07:30:00.000Z")]);
        let bad = train(2, vec![row("HKI", "DEPARTURE", "not a time")]);

        let trains = convert_trains(&[good, bad]);
        assert_eq!(trains.len(), 1);
        assert_eq!(trains[0].train_number, 1);
    }

    #[test]
    fn convert_stations_skips_blank_codes() {
        let stations = vec![
            StationDto {
                station_name: "Helsinki asema".to_string(),
                station_short_code: "HKI".to_string(),
                passenger_traffic: true,
            },
            StationDto {
                station_name: "Broken".to_string(),
                station_short_code: String::new(),
                passenger_traffic: false,
            },
        ];

        let converted = convert_stations(&stations);
        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].short_code.as_str(), "HKI");
        assert!(converted[0].passenger_traffic);
    }
}
