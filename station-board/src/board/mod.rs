//! Station board computation.
//!
//! This module answers: "which trains call at this station around now, in
//! what order, and are they late?" It is synchronous and holds no state, so
//! boards for different stations can be computed concurrently.

mod config;
mod view;
mod window;

#[cfg(test)]
mod window_tests;

pub use config::BoardConfig;
pub use view::{Board, BoardEntry, DelayStatus, NO_TIME, TimeWindow};
pub use window::{BoardError, WINDOW_HOURS, compute_board, compute_window};
