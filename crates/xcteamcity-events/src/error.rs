// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for xcteamcity-events

use thiserror::Error;

/// Errors that can occur while decoding upstream events
#[derive(Debug, Error)]
pub enum EventError {
    /// Error parsing an event line as JSON
    ///
    /// A malformed payload (unknown tag, missing required field) is a
    /// programmer error in the upstream producer; decoding fails fast and
    /// the formatter does not attempt partial recovery.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
