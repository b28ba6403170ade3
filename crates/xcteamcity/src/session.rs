// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Session wiring
//!
//! A [`Session`] owns the whole pipeline for one process lifetime: it writes
//! the `compilationStarted` marker when opened, routes each event through the
//! aggregator first and the formatter second, and on [`Session::shutdown`]
//! performs the final report flush before writing the `compilationFinished`
//! marker. A protocol consumer that sees the closing marker can rely on the
//! report file being durable.
//!
//! `shutdown` is part of the lifecycle contract: the host process must invoke
//! it exactly once on every termination path, normal or abrupt. It is guarded
//! internally, so a second call is inert rather than a double close.

use std::io::Write;

use thiserror::Error;
use tracing::{debug, info};

use crate::report::{Aggregator, Report, ReportError};
use xcteamcity_events::Event;
use xcteamcity_protocol::{EventFormat, TeamCityFormat};

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Report aggregation or flushing failed
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Writing protocol output failed
    #[error("Protocol output error: {0}")]
    Io(#[from] std::io::Error),
}

/// One process lifetime of the formatter: aggregator + emitter in lockstep
pub struct Session<W: Write> {
    format: TeamCityFormat,
    aggregator: Aggregator,
    out: W,
    finished: bool,
}

impl<W: Write> Session<W> {
    /// Open a session, writing the `compilationStarted` marker
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the marker cannot be written.
    pub fn new(aggregator: Aggregator, mut out: W) -> Result<Self, SessionError> {
        writeln!(out, "{}", TeamCityFormat::compilation_started_marker())?;
        info!(report = %aggregator.path().display(), "Session opened");
        Ok(Self {
            format: TeamCityFormat::new(),
            aggregator,
            out,
            finished: false,
        })
    }

    /// Process one upstream event
    ///
    /// The aggregator records (and, under the every-event policy, flushes)
    /// before the protocol lines are written.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the flush or the output write fails; both
    /// are fatal to the run.
    pub fn handle(&mut self, event: &Event) -> Result<(), SessionError> {
        self.aggregator.record(event)?;
        for line in self.format.apply(event) {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    /// Close the session: final flush, then the `compilationFinished` marker
    ///
    /// Required exactly once on every termination path. A repeat call does
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the final flush or the marker write fails.
    pub fn shutdown(&mut self) -> Result<(), SessionError> {
        if self.finished {
            debug!("Session already shut down");
            return Ok(());
        }
        self.finished = true;

        // Report durability before the closing marker
        self.aggregator.flush()?;
        writeln!(self.out, "{}", TeamCityFormat::compilation_finished_marker())?;
        self.out.flush()?;
        info!("Session closed");
        Ok(())
    }

    /// The accumulated report
    #[must_use]
    pub fn report(&self) -> &Report {
        self.aggregator.report()
    }
}
