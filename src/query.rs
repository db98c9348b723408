//! The search term handed to the pipeline by its host.
//!
//! The host (the CLI here, a web form elsewhere) owns input handling. It calls
//! [`Query::sanitize`] on whatever the user typed and only hands the pipeline a
//! `Query` if something meaningful is left. An empty input is not an error; it
//! is the "nothing searched yet" state.

use std::fmt;

use serde::Serialize;

use crate::util::{collapse_whitespace, strip_control_chars};

/// A sanitized, non-empty search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Reduces raw user input to plain text.
    ///
    /// Control characters and ANSI sequences are removed, whitespace runs are
    /// collapsed to single spaces, and the ends are trimmed. Returns `None` when
    /// nothing is left.
    pub fn sanitize(raw: &str) -> Option<Self> {
        let cleaned = collapse_whitespace(&strip_control_chars(raw));
        if cleaned.is_empty() {
            None
        } else {
            Some(Self(cleaned))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
