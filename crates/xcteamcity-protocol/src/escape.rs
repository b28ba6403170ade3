// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! TeamCity attribute-value escaping
//!
//! Every attribute value must be escaped before it is placed inside the
//! single quotes of a service message, or the server's message parser will
//! corrupt on it. The substitutions are:
//!
//! | character | replacement |
//! |-----------|-------------|
//! | `\|`      | `\|\|`      |
//! | newline   | `\|n`       |
//! | `'`       | `\|'`       |
//! | `[`       | `\|[`       |
//! | `]`       | `\|]`       |
//!
//! The pipe substitution must logically come first so the pipes introduced by
//! the other replacements are not themselves re-escaped; processing one
//! character at a time gives that ordering for free.

/// Escape a value for use inside a quoted service-message attribute
#[must_use]
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '|' => escaped.push_str("||"),
            '\n' => escaped.push_str("|n"),
            '\'' => escaped.push_str("|'"),
            '[' => escaped.push_str("|["),
            ']' => escaped.push_str("|]"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Undo [`escape`]
///
/// Unrecognized escape sequences and a trailing lone pipe are passed through
/// verbatim rather than rejected; the inputs this sees are produced by
/// [`escape`] and are always well formed.
#[must_use]
pub fn unescape(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '|' {
            unescaped.push(ch);
            continue;
        }
        match chars.next() {
            Some('|') => unescaped.push('|'),
            Some('n') => unescaped.push('\n'),
            Some('\'') => unescaped.push('\''),
            Some('[') => unescaped.push('['),
            Some(']') => unescaped.push(']'),
            Some(other) => {
                unescaped.push('|');
                unescaped.push(other);
            }
            None => unescaped.push('|'),
        }
    }
    unescaped
}
