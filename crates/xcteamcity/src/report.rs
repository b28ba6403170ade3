// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report aggregation and flushing
//!
//! Every event's diagnostic payload lands in one of the report's ten
//! categories. Most categories are append-only and preserve duplicates; the
//! two linker-symbol categories keep only the latest occurrence, and the
//! per-suite failure counts merge key-wise with last-write-wins. Flushing
//! rewrites the whole report file from in-memory state, atomically, creating
//! parent directories as needed. The report is load-bearing for CI triage:
//! a flush failure is fatal, never swallowed.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::FlushPolicy;
use xcteamcity_events::{
    CompileIssue, DuplicateSymbols, Event, FileMissingIssue, UndefinedSymbols,
};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while flushing the report
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to write the report file or its directories
    #[error("Failed to write report to {path}: {source}")]
    Io {
        /// Destination the write was aimed at
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to serialize the report
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ============================================================================
// Report
// ============================================================================

/// The aggregated error report, serialized as pretty-printed JSON
///
/// Exactly these ten fields, in this order, with these JSON names; downstream
/// triage tooling reads the file positionally enough that the shape is a
/// compatibility contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Generic build warnings, append-only
    pub warnings: Vec<String>,
    /// Linker warnings, append-only
    pub ld_warnings: Vec<String>,
    /// Compiler warnings with source locations, append-only
    pub compile_warnings: Vec<CompileIssue>,
    /// Generic build errors, append-only
    pub errors: Vec<String>,
    /// Compiler errors with source locations, append-only
    pub compile_errors: Vec<CompileIssue>,
    /// Missing-file errors, append-only
    pub file_missing_errors: Vec<FileMissingIssue>,
    /// Latest undefined-symbols diagnostic; last write wins
    pub undefined_symbols_errors: Option<UndefinedSymbols>,
    /// Latest duplicate-symbols diagnostic; last write wins
    pub duplicate_symbols_errors: Option<DuplicateSymbols>,
    /// Failure count per suite, merged key-wise across summaries
    pub test_failures: BTreeMap<String, u64>,
    /// Test summary headlines, append-only
    pub test_summary_messages: Vec<String>,
}

impl Report {
    /// Fold one event's diagnostic payload in; returns whether anything changed
    pub fn record(&mut self, event: &Event) -> bool {
        match event {
            Event::Warning { message } => {
                self.warnings.push(message.clone());
            }
            Event::LdWarning { message } => {
                self.ld_warnings.push(message.clone());
            }
            Event::CompileWarning(issue) => {
                self.compile_warnings.push(issue.clone());
            }
            Event::Error { message } => {
                self.errors.push(message.clone());
            }
            Event::CompileError(issue) => {
                self.compile_errors.push(issue.clone());
            }
            Event::FileMissingError(issue) => {
                self.file_missing_errors.push(issue.clone());
            }
            Event::UndefinedSymbolsError(symbols) => {
                self.undefined_symbols_errors = Some(symbols.clone());
            }
            Event::DuplicateSymbolsError(symbols) => {
                self.duplicate_symbols_errors = Some(symbols.clone());
            }
            Event::TestSummary {
                message,
                failures_per_suite,
            } => {
                // Map merge: a later summary overwrites a suite's count
                // rather than adding to it
                for (suite, count) in failures_per_suite {
                    self.test_failures.insert(suite.clone(), *count);
                }
                self.test_summary_messages.push(message.clone());
            }
            _ => return false,
        }
        true
    }
}

// ============================================================================
// Aggregator
// ============================================================================

/// Accumulates diagnostics and persists them per the flush policy
#[derive(Debug)]
pub struct Aggregator {
    report: Report,
    path: PathBuf,
    policy: FlushPolicy,
}

impl Aggregator {
    /// Create an aggregator writing to `path` under `policy`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, policy: FlushPolicy) -> Self {
        Self {
            report: Report::default(),
            path: path.into(),
            policy,
        }
    }

    /// The accumulated in-memory report
    #[must_use]
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// The report destination
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record an event, flushing afterwards if the policy calls for it
    ///
    /// The flush happens before the caller goes on to emit the event's
    /// protocol lines, so the report file is durable by the time a protocol
    /// consumer sees the corresponding output.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if the intra-run flush fails.
    pub fn record(&mut self, event: &Event) -> Result<(), ReportError> {
        let mutated = self.report.record(event);
        if mutated && self.policy == FlushPolicy::EveryEvent {
            self.flush()?;
        }
        Ok(())
    }

    /// Atomically rewrite the report file from in-memory state
    ///
    /// Idempotent; may be called any number of times. Writes to a sibling
    /// temp file and renames it over the destination so a crash mid-write
    /// never leaves a truncated report.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if directories cannot be created or the write
    /// or rename fails.
    pub fn flush(&self) -> Result<(), ReportError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ReportError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(&self.report)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| ReportError::Io {
            path: tmp_path.clone(),
            source: e,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| ReportError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(path = %self.path.display(), "Flushed report");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
