// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! xcteamcity-events: build and test event model for xcteamcity
//!
//! This library crate defines the typed events an upstream xcodebuild log
//! parser delivers to the formatter, one JSON object per line.
//!
//! # Example
//!
//! ```
//! use xcteamcity_events::Event;
//!
//! let event = Event::from_json_line(r#"{"type":"compile","fileName":"App.swift","filePath":"Sources/App.swift"}"#).unwrap();
//! assert!(matches!(event, Event::Compile { .. }));
//! ```

pub mod error;
pub mod event;

pub use error::EventError;
pub use event::{
    CompileIssue, DuplicateSymbols, Event, FileMissingIssue, UndefinedSymbols,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::EventError;
    pub use crate::event::{CompileIssue, Event};
}
