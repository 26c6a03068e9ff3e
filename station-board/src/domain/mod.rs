//! Domain types for the station board.
//!
//! This module contains the core domain model types that represent
//! validated rail data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod error;
mod station;
mod train;

pub use error::DomainError;
pub use station::{InvalidStationCode, Station, StationCode};
pub use train::{RowType, TimetableRow, Train};
