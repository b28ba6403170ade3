//! Upstream build and test events
//!
//! The xcodebuild log parser upstream of this formatter emits one typed event
//! per parsed log line, serialized as internally-tagged JSON:
//!
//! ```json
//! {"type":"passingTest","suite":"LoginTests","test":"testLogin","elapsed":"0.1"}
//! ```
//!
//! Events arrive in build order, are delivered exactly once, and are consumed
//! once. The formatter never retains an event beyond aggregation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::EventError;

// ============================================================================
// Diagnostic Payload Records
// ============================================================================

/// A compiler diagnostic tied to a source location
///
/// `line` is the offending source line text and `cursor` the caret string
/// underneath it, exactly as the build tool printed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileIssue {
    /// File name, e.g. "App.swift"
    pub file_name: String,
    /// Path to the file
    pub file_path: String,
    /// Diagnostic message from the compiler
    pub reason: String,
    /// The offending source line text
    pub line: String,
    /// Caret string marking the column
    pub cursor: String,
}

/// A missing-file diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMissingIssue {
    /// Path the build referenced but could not find
    pub file_path: String,
    /// Diagnostic message
    pub reason: String,
}

/// An undefined-symbols linker diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndefinedSymbols {
    /// Linker headline, e.g. "Undefined symbols for architecture arm64"
    pub message: String,
    /// The unresolved symbol
    pub symbol: String,
    /// Where the symbol was referenced from
    pub reference: String,
}

/// A duplicate-symbols linker diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateSymbols {
    /// Linker headline
    pub message: String,
    /// Object files carrying the duplicate definitions
    pub file_paths: Vec<String>,
}

// ============================================================================
// Event Union
// ============================================================================

/// A single event from the upstream build-log parser
///
/// Internally tagged on `type` with camelCase tags, matching the producer's
/// wire format. Timing fields (`elapsed`) are the upstream tool's formatted
/// duration strings and are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    /// The build tool started compiling
    CompilationStarted,
    /// The build tool finished compiling
    CompilationFinished,
    /// Dependency check phase
    CheckDependencies,
    /// A target build began
    #[serde(rename_all = "camelCase")]
    BuildTarget {
        /// Target being built
        target: String,
        /// Project the target belongs to
        project: String,
        /// Build configuration, e.g. "Debug"
        configuration: String,
    },
    /// A source file is being compiled
    #[serde(rename_all = "camelCase")]
    Compile {
        file_name: String,
        file_path: String,
    },
    /// A file is being touched
    #[serde(rename_all = "camelCase")]
    Touch {
        file_path: String,
        file_name: String,
    },
    /// A build phase completed successfully
    #[serde(rename_all = "camelCase")]
    PhaseSuccess {
        /// Phase name, e.g. "Build" or "Clean"
        phase_name: String,
    },
    /// A test run (one test target's execution) began
    TestRunStarted { name: String },
    /// A test run finished; delivered exactly once per run, after all of the
    /// run's suite and test events
    #[serde(rename_all = "camelCase")]
    TestRunFinished { name: String, elapsed: String },
    /// A test suite began; the stream never emits a matching finish event
    TestSuiteStarted { name: String },
    /// A test passed
    #[serde(rename_all = "camelCase")]
    PassingTest {
        suite: String,
        test: String,
        elapsed: String,
    },
    /// A test failed
    #[serde(rename_all = "camelCase")]
    FailingTest {
        suite: String,
        test: String,
        elapsed: String,
        file_path: String,
    },
    /// A generic build warning
    Warning { message: String },
    /// A compiler warning with source location
    CompileWarning(CompileIssue),
    /// A linker warning
    LdWarning { message: String },
    /// A generic build error
    Error { message: String },
    /// A compiler error with source location
    CompileError(CompileIssue),
    /// A referenced file does not exist
    FileMissingError(FileMissingIssue),
    /// Undefined symbols at link time
    UndefinedSymbolsError(UndefinedSymbols),
    /// Duplicate symbols at link time
    DuplicateSymbolsError(DuplicateSymbols),
    /// The final test summary
    #[serde(rename_all = "camelCase")]
    TestSummary {
        /// Headline, e.g. "Executed 42 tests, with 2 failures"
        message: String,
        /// Failure count per suite
        failures_per_suite: BTreeMap<String, u64>,
    },
}

impl Event {
    /// Decode a single NDJSON event line
    ///
    /// # Errors
    ///
    /// Returns `EventError::JsonParse` if the line is not a well-formed
    /// event object.
    pub fn from_json_line(line: &str) -> Result<Self, EventError> {
        serde_json::from_str(line.trim()).map_err(EventError::from)
    }

    /// Whether this event carries a diagnostic the report aggregates
    #[must_use]
    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            Event::Warning { .. }
                | Event::CompileWarning(_)
                | Event::LdWarning { .. }
                | Event::Error { .. }
                | Event::CompileError(_)
                | Event::FileMissingError(_)
                | Event::UndefinedSymbolsError(_)
                | Event::DuplicateSymbolsError(_)
                | Event::TestSummary { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_decode_unit_variant() {
        let event = Event::from_json_line(r#"{"type":"checkDependencies"}"#).expect("Should parse");
        assert_eq!(event, Event::CheckDependencies);
    }

    #[test]
    fn test_decode_passing_test() {
        let event = Event::from_json_line(
            r#"{"type":"passingTest","suite":"LoginTests","test":"testLogin","elapsed":"0.1"}"#,
        )
        .expect("Should parse");
        assert_eq!(
            event,
            Event::PassingTest {
                suite: "LoginTests".to_string(),
                test: "testLogin".to_string(),
                elapsed: "0.1".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_compile_error_payload() {
        let event = Event::from_json_line(
            r#"{"type":"compileError","fileName":"App.swift","filePath":"Sources/App.swift","reason":"expected ';'","line":"let x = 1","cursor":"        ^"}"#,
        )
        .expect("Should parse");
        match event {
            Event::CompileError(issue) => {
                assert_eq!(issue.file_name, "App.swift");
                assert_eq!(issue.reason, "expected ';'");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_decode_test_summary_map() {
        let event = Event::from_json_line(
            r#"{"type":"testSummary","message":"Executed 3 tests","failuresPerSuite":{"A":2,"B":1}}"#,
        )
        .expect("Should parse");
        match event {
            Event::TestSummary {
                failures_per_suite, ..
            } => {
                assert_eq!(failures_per_suite.get("A"), Some(&2));
                assert_eq!(failures_per_suite.get("B"), Some(&1));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_decode_duplicate_symbols_paths() {
        let event = Event::from_json_line(
            r#"{"type":"duplicateSymbolsError","message":"2 duplicate symbols","filePaths":["a.o","b.o"]}"#,
        )
        .expect("Should parse");
        match event {
            Event::DuplicateSymbolsError(dup) => {
                assert_eq!(dup.file_paths, vec!["a.o".to_string(), "b.o".to_string()]);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_is_fatal() {
        // passingTest without the elapsed field
        let result =
            Event::from_json_line(r#"{"type":"passingTest","suite":"S","test":"t"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_tag_is_fatal() {
        let result = Event::from_json_line(r#"{"type":"fooBar"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_json_is_fatal() {
        assert!(Event::from_json_line("not json").is_err());
    }

    #[test]
    fn test_is_diagnostic() {
        let warning = Event::Warning {
            message: "w".to_string(),
        };
        assert!(warning.is_diagnostic());

        let progress = Event::Compile {
            file_name: "a.swift".to_string(),
            file_path: "Sources/a.swift".to_string(),
        };
        assert!(!progress.is_diagnostic());
    }

    #[test]
    fn test_round_trip_serialization() {
        let event = Event::FailingTest {
            suite: "SignupTests".to_string(),
            test: "testSignup".to_string(),
            elapsed: "0.2".to_string(),
            file_path: "/f.swift".to_string(),
        };
        let json = serde_json::to_string(&event).expect("Should serialize");
        let back = Event::from_json_line(&json).expect("Should parse back");
        assert_eq!(event, back);
    }
}
