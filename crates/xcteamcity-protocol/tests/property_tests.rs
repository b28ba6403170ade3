// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for xcteamcity-protocol
//!
//! These tests use proptest to verify the escaping and suite-boundary
//! invariants hold for arbitrary inputs, not just the hand-picked cases.

use proptest::prelude::*;
use xcteamcity_events::Event;
use xcteamcity_protocol::{ALL_TESTS_SUITE, EventFormat, TeamCityFormat, escape, unescape};

// ============================================================================
// Strategies
// ============================================================================

/// Generate arbitrary strings biased toward protocol-hostile characters
fn hostile_string() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("".to_string()),
        Just("|".to_string()),
        Just("||".to_string()),
        Just("|n".to_string()),
        Just("'".to_string()),
        Just("[]".to_string()),
        Just("|['|]".to_string()),
        Just("line one\nline two".to_string()),
        Just("日本語テスト".to_string()),
        Just("emoji 🔥🚀".to_string()),
        // Random over the full escape alphabet plus filler
        proptest::collection::vec(
            prop_oneof![
                Just('|'),
                Just('\''),
                Just('['),
                Just(']'),
                Just('\n'),
                proptest::char::range('a', 'z'),
            ],
            0..64
        )
        .prop_map(|chars| chars.into_iter().collect()),
        ".*",
    ]
}

/// Generate suite names that are never the sentinel
fn non_sentinel_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,20}Tests".prop_filter("not the sentinel", |n| n != ALL_TESTS_SUITE)
}

// ============================================================================
// Escaping laws
// ============================================================================

proptest! {
    #[test]
    fn prop_escape_round_trips(original in hostile_string()) {
        prop_assert_eq!(unescape(&escape(&original)), original);
    }

    #[test]
    fn prop_escaped_output_is_protocol_safe(original in hostile_string()) {
        let escaped = escape(&original);
        prop_assert!(!escaped.contains('\n'));
        // Every quote and bracket must be part of an escape sequence
        let chars: Vec<char> = escaped.chars().collect();
        for (idx, ch) in chars.iter().enumerate() {
            if matches!(ch, '\'' | '[' | ']') {
                prop_assert!(idx > 0 && chars[idx - 1] == '|');
            }
        }
    }

    #[test]
    fn prop_escape_is_identity_on_safe_text(text in "[a-zA-Z0-9 ._/-]{0,64}") {
        prop_assert_eq!(escape(&text), text.clone());
    }
}

// ============================================================================
// Suite-boundary laws
// ============================================================================

proptest! {
    /// Every suiteStarted line has a matching suiteFinished by end of run
    #[test]
    fn prop_suite_boundaries_balance(names in proptest::collection::vec(non_sentinel_name(), 0..12)) {
        let mut format = TeamCityFormat::new();
        let mut lines: Vec<String> = Vec::new();

        lines.extend(format.apply(&Event::TestRunStarted { name: "Run".to_string() }));
        for name in &names {
            lines.extend(format.apply(&Event::TestSuiteStarted { name: name.clone() }));
        }
        lines.extend(format.apply(&Event::TestRunFinished {
            name: "Run".to_string(),
            elapsed: "1.0".to_string(),
        }));

        let started = lines.iter().filter(|l| l.starts_with("##teamcity[testSuiteStarted")).count();
        let finished = lines.iter().filter(|l| l.starts_with("##teamcity[testSuiteFinished")).count();
        prop_assert_eq!(started, finished);
        prop_assert!(format.open_suite().is_none());
    }

    /// The sentinel produces no lines regardless of surrounding events
    #[test]
    fn prop_sentinel_is_always_silent(before in proptest::collection::vec(non_sentinel_name(), 0..4)) {
        let mut format = TeamCityFormat::new();
        for name in &before {
            format.apply(&Event::TestSuiteStarted { name: name.clone() });
        }
        let open_before = format.open_suite().map(str::to_string);
        let lines = format.apply(&Event::TestSuiteStarted { name: ALL_TESTS_SUITE.to_string() });
        prop_assert!(lines.is_empty());
        prop_assert_eq!(format.open_suite().map(str::to_string), open_before);
    }

    /// Warning events never produce protocol output for any message
    #[test]
    fn prop_warnings_never_emit(message in hostile_string()) {
        let mut format = TeamCityFormat::new();
        let warning_lines = format.apply(&Event::Warning { message: message.clone() });
        prop_assert!(warning_lines.is_empty());
        let ld_warning_lines = format.apply(&Event::LdWarning { message });
        prop_assert!(ld_warning_lines.is_empty());
    }
}
