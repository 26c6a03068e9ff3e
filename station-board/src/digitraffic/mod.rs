//! Digitraffic rail API client.
//!
//! This module provides an HTTP client for the Finnish open rail data API,
//! which serves station metadata and live train timetables.
//!
//! Key characteristics of the API:
//! - Timestamps are RFC 3339 in UTC ("2024-05-10T07:30:00.000Z")
//! - A train's `timeTableRows` cover its whole route, origin first
//! - Clients identify themselves with a `Digitraffic-User` header

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{DigitrafficClient, DigitrafficConfig, LiveTrainsQuery};
pub use convert::{convert_stations, convert_train, convert_trains, parse_timestamp};
pub use error::DigitrafficError;
pub use mock::MockDigitrafficClient;
pub use types::{StationDto, TimeTableRowDto, TrainDto};

#[cfg(test)]
pub(crate) use mock::write_fixtures;
