// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! xcteamcity-protocol: TeamCity service-message formatting
//!
//! This library crate maps upstream build/test events to TeamCity service
//! messages (`##teamcity[...]` lines). It owns the attribute escaping rules,
//! the message builder, and the suite-boundary state machine that synthesizes
//! `testSuiteFinished` messages for a stream that never closes suites itself.
//!
//! # Example
//!
//! ```
//! use xcteamcity_events::Event;
//! use xcteamcity_protocol::{EventFormat, TeamCityFormat};
//!
//! let mut format = TeamCityFormat::new();
//! let lines = format.apply(&Event::TestRunStarted { name: "Unit Tests".to_string() });
//! assert_eq!(lines, vec!["##teamcity[testSuiteStarted name='Unit Tests']"]);
//! ```

pub mod escape;
pub mod format;
pub mod message;
pub mod teamcity;

pub use escape::{escape, unescape};
pub use format::{EventFormat, Lines};
pub use message::ServiceMessage;
pub use teamcity::{ALL_TESTS_SUITE, TeamCityFormat};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::escape::escape;
    pub use crate::format::EventFormat;
    pub use crate::message::ServiceMessage;
    pub use crate::teamcity::TeamCityFormat;
}
