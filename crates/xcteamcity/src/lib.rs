//! xcteamcity library
//!
//! This module exports the core functionality of xcteamcity for use in
//! integration tests and as a library: report aggregation, the session
//! wiring, and the CLI configuration.

pub mod config;
pub mod report;
pub mod session;
