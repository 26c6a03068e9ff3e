//! Web layer for the station board.
//!
//! Provides the dashboard page, station search, board endpoints and the
//! theme preference toggle.

mod dto;
mod maps;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use maps::maps_search_url;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
