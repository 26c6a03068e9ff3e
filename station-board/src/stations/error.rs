//! Station directory error types.

use crate::digitraffic::DigitrafficError;

/// Errors that can occur when loading or caching station metadata.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// The metadata feed could not be fetched or parsed
    #[error("station metadata unavailable: {0}")]
    Source(#[from] DigitrafficError),

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}

/// Errors from resolving user input to a station.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Neither a query nor a selection was given
    #[error("please enter or choose a station")]
    EmptyQuery,

    /// Nothing in the directory matched
    #[error("station not found: {0}")]
    NotFound(String),
}
