//! Configuration for the xcteamcity formatter
//!
//! The formatter core defines no flags of its own; the host binary carries
//! the report destination, the flush policy, and logging verbosity. The
//! report path honors an environment override so the surrounding build tool
//! can set it without touching the command line.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// When the aggregated report is rewritten to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FlushPolicy {
    /// Flush after every mutating event; survives abrupt termination
    #[default]
    EveryEvent,
    /// Flush once at shutdown; cheaper, but a crash before shutdown loses
    /// the accumulated report
    AtExit,
}

/// xcteamcity - reformat xcodebuild events as TeamCity service messages
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "xcteamcity")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path the aggregated JSON error report is written to
    ///
    /// Defaults to build/reports/errors.json relative to the working
    /// directory. Parent directories are created on demand.
    #[arg(short, long, env = "XCTEAMCITY_REPORT")]
    pub report: Option<PathBuf>,

    /// When to flush the aggregated report
    #[arg(long, value_enum, default_value_t = FlushPolicy::EveryEvent)]
    pub flush: FlushPolicy,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr; stdout is reserved for the service
    /// message protocol.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Fixed default report destination
    pub const DEFAULT_REPORT_PATH: &'static str = "build/reports/errors.json";

    /// Get the report path, using the fixed default if not specified
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.report
            .clone()
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_REPORT_PATH))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the report's parent directory cannot be created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let report_path = self.report_path();
        if let Some(parent) = report_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::ReportDirectoryCreateFailed(parent.to_path_buf(), e)
            })?;
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to create the report directory
    #[error("Failed to create report directory {0}: {1}")]
    ReportDirectoryCreateFailed(PathBuf, std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.report.is_none());
        assert_eq!(config.flush, FlushPolicy::EveryEvent);
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_report_path_default() {
        let config = Config::default();
        assert_eq!(
            config.report_path(),
            PathBuf::from("build/reports/errors.json")
        );
    }

    #[test]
    fn test_report_path_custom() {
        let custom = PathBuf::from("/custom/path/report.json");
        let config = Config {
            report: Some(custom.clone()),
            ..Default::default()
        };
        assert_eq!(config.report_path(), custom);
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_creates_parent_directory() {
        let dir = std::env::temp_dir().join(format!(
            "xcteamcity-config-test-{}",
            std::process::id()
        ));
        let config = Config {
            report: Some(dir.join("nested/errors.json")),
            ..Default::default()
        };
        config.validate().expect("Should create parent dirs");
        assert!(dir.join("nested").exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
