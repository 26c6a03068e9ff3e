//! Station metadata: lookup, resolution and caching.
//!
//! Provides short code → station mapping, fetched from the Digitraffic
//! metadata feed at startup (or a fresh disk cache) and refreshed daily.

mod cache;
mod directory;
mod error;
mod registry;

pub use cache::{StationCache, StationCacheConfig};
pub use directory::{NO_SELECTION, StationDirectory};
pub use error::{ResolveError, StationError};
pub use registry::StationRegistry;
