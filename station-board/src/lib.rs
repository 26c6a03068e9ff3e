//! Railway station board server.
//!
//! A web dashboard that answers: "which trains arrive at or leave this
//! station within two hours of now, and are they on time?"

pub mod board;
pub mod cache;
pub mod digitraffic;
pub mod domain;
pub mod preferences;
pub mod refresh;
pub mod source;
pub mod stations;
pub mod web;
