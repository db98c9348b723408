//! Turning an [`Outcome`](crate::feed::Outcome) into something to show.
//!
//! Three renderings share the same wording:
//!
//! - [`html`] - An escaped HTML fragment, plus [`render_page`] which prefixes
//!   the stylesheet once
//! - [`text`] - Terminal output with control characters stripped
//! - [`json`] - Machine-readable report
//!
//! Error states never include partial results. A parse failure shows the raw
//! payload only when the host context allows it.

mod html;
mod json;
mod style;
mod text;

use clap::ValueEnum;
use serde::Deserialize;

use crate::feed::{Outcome, SearchError};
use crate::host::HostContext;
use crate::query::Query;

pub use html::{render_html, render_page};
pub use json::render_json;
pub use style::STYLESHEET;
pub use text::render_text;

/// Shown when there is no query yet.
pub const PROMPT: &str = "Please enter a search term above to search Google News.";
/// Shown when the feed parsed but had no usable items.
pub const NO_RESULTS: &str = "No results found.";

/// Output format selectable from the CLI or config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Html,
    Json,
}

/// Renders an outcome in the requested format.
///
/// `width` only affects text output.
pub fn render(
    format: Format,
    query: Option<&Query>,
    outcome: &Outcome,
    ctx: &HostContext,
    width: usize,
) -> String {
    match format {
        Format::Text => render_text(query, outcome, ctx, width),
        Format::Html => render_page(query, outcome, ctx),
        Format::Json => render_json(query, outcome, ctx),
    }
}

/// The end-user message for a failed search.
pub fn user_message(err: &SearchError) -> String {
    match err {
        SearchError::Transport(_) => "Error fetching results. Please try again later.".to_string(),
        SearchError::Status { code, .. } => {
            format!("Error fetching results (HTTP {code}). Please try again later.")
        }
        SearchError::EmptyBody => "No response from remote server.".to_string(),
        SearchError::Parse(_) => "Unable to parse response.".to_string(),
    }
}

/// Stable identifier for an error kind, used in JSON output.
pub fn error_kind(err: &SearchError) -> &'static str {
    match err {
        SearchError::Transport(_) => "transport",
        SearchError::Status { .. } => "status",
        SearchError::EmptyBody => "empty_body",
        SearchError::Parse(_) => "parse",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::TransportError;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            user_message(&SearchError::Status {
                code: 500,
                url: "u".into()
            }),
            "Error fetching results (HTTP 500). Please try again later."
        );
        assert_eq!(
            user_message(&SearchError::Transport(TransportError::Timeout)),
            "Error fetching results. Please try again later."
        );
        assert_eq!(
            user_message(&SearchError::EmptyBody),
            "No response from remote server."
        );
    }

    #[test]
    fn test_format_parses_from_config_value() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: Format,
        }
        let w: Wrapper = toml::from_str("format = \"json\"").unwrap();
        assert_eq!(w.format, Format::Json);
        assert_eq!(Format::default(), Format::Text);
    }
}
