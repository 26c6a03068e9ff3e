//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from API/IO errors.

use super::InvalidStationCode;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A station code failed validation
    #[error(transparent)]
    InvalidStationCode(#[from] InvalidStationCode),

    /// A timetable row type was neither ARRIVAL nor DEPARTURE
    #[error("unknown timetable row type: {0}")]
    UnknownRowType(String),

    /// A timestamp could not be parsed
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A train was delivered without any timetable rows
    #[error("train {0} has no timetable rows")]
    EmptyRoute(u32),
}
