//! xcteamcity: streaming xcodebuild-to-TeamCity log reformatter
//!
//! This binary crate reads NDJSON build/test events from stdin, writes
//! TeamCity service messages to stdout, and maintains an aggregated JSON
//! error report on disk.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing::error;

use xcteamcity::config::Config;
use xcteamcity::report::Aggregator;
use xcteamcity::session::Session;
use xcteamcity_events::Event;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the service-message protocol
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate()?;

    let aggregator = Aggregator::new(config.report_path(), config.flush);
    let stdout = io::stdout();
    let mut session = Session::new(aggregator, stdout.lock())?;

    let result = pump(&mut session);

    // The shutdown contract holds on the error path too: final flush, then
    // the closing marker
    let shutdown = session.shutdown();
    if let Err(ref e) = result {
        error!(error = %e, "Event stream processing failed");
    }
    result?;
    shutdown?;
    Ok(())
}

/// Feed stdin's event lines through the session until EOF
fn pump<W: Write>(session: &mut Session<W>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read event line from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let event = Event::from_json_line(&line)
            .with_context(|| format!("Malformed event line: {line}"))?;
        session.handle(&event)?;
    }
    Ok(())
}
