// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Service-message builder
//!
//! A TeamCity service message is one line of the form
//! `##teamcity[<messageName> key='value' ...]`, or the bare single-value form
//! `##teamcity[<messageName> 'value']` used by `progressMessage`. Attribute
//! values are escaped when the message is rendered, so callers pass raw text.

use std::fmt;

use crate::escape::escape;

/// The body of a service message: named attributes or one bare value
#[derive(Debug, Clone)]
enum Body {
    Attrs(Vec<(&'static str, String)>),
    Bare(String),
}

/// A single `##teamcity[...]` line under construction
#[derive(Debug, Clone)]
pub struct ServiceMessage {
    name: &'static str,
    body: Body,
}

impl ServiceMessage {
    /// Start a message with named attributes
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            body: Body::Attrs(Vec::new()),
        }
    }

    /// Build a bare single-value message, e.g. `progressMessage 'text'`
    #[must_use]
    pub fn bare(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            body: Body::Bare(value.into()),
        }
    }

    /// Append a named attribute; values are escaped at render time
    #[must_use]
    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        if let Body::Attrs(ref mut attrs) = self.body {
            attrs.push((key, value.into()));
        }
        self
    }

    /// Render the message as one protocol line
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ServiceMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "##teamcity[{}", self.name)?;
        match self.body {
            Body::Bare(ref value) => write!(f, " '{}'", escape(value))?,
            Body::Attrs(ref attrs) => {
                for (key, value) in attrs {
                    write!(f, " {}='{}'", key, escape(value))?;
                }
            }
        }
        write!(f, "]")
    }
}
