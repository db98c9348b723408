use std::fmt::Write;

use crate::feed::{Outcome, SearchError};
use crate::host::HostContext;
use crate::query::Query;
use crate::render::{user_message, NO_RESULTS};
use crate::util::{strip_control_chars, truncate_to_width};

/// Indent for the detail lines under each numbered title
const DETAIL_INDENT: &str = "    ";

/// Renders an outcome for a terminal.
///
/// Titles are truncated to `width` columns. Every remote string passes
/// through [`strip_control_chars`] first, so feed content cannot emit
/// escape sequences.
///
/// # Arguments
///
/// * `query` - Echoed in the heading
/// * `outcome` - The single outcome of the search
/// * `ctx` - Parse failure details are printed only for privileged debug sessions
/// * `width` - Column budget for each title line, including its number
pub fn render_text(
    query: Option<&Query>,
    outcome: &Outcome,
    ctx: &HostContext,
    width: usize,
) -> String {
    let mut out = String::new();

    match outcome {
        Outcome::EmptyQuery => {
            out.push_str("Please enter a search term to search Google News.\n");
        }
        Outcome::Failed(err) => {
            let _ = writeln!(out, "error: {}", user_message(err));
            if let SearchError::Parse(failure) = err {
                if ctx.show_raw_payloads() {
                    let _ = writeln!(
                        out,
                        "\nHTTP code: {} | Content-Type: {}",
                        failure.status,
                        strip_control_chars(failure.content_type.as_deref().unwrap_or(""))
                    );
                    let _ = writeln!(out, "Parser: {}", failure.direct_error);
                    let _ = writeln!(out, "--- response body ---");
                    let _ = writeln!(out, "{}", strip_control_chars(&failure.body));
                }
            }
        }
        Outcome::NoResults => {
            heading(&mut out, query);
            let _ = writeln!(out, "{}", NO_RESULTS);
        }
        Outcome::Success(items) => {
            heading(&mut out, query);
            let number_width = items.len().to_string().len();
            for (i, item) in items.iter().enumerate() {
                let prefix = format!("{:>w$}. ", i + 1, w = number_width);
                let title = strip_control_chars(&item.title);
                let room = width.saturating_sub(prefix.len());
                let _ = writeln!(out, "{}{}", prefix, truncate_to_width(&title, room));

                let mut meta = Vec::new();
                if let Some(source) = &item.source {
                    meta.push(strip_control_chars(source).into_owned());
                }
                if let Some(published) = item.published {
                    meta.push(published.format("%Y-%m-%d %H:%M UTC").to_string());
                }
                if !meta.is_empty() {
                    let _ = writeln!(out, "{}{}", DETAIL_INDENT, meta.join(" | "));
                }
                let _ = writeln!(out, "{}{}", DETAIL_INDENT, strip_control_chars(&item.link));
            }
        }
    }

    out
}

fn heading(out: &mut String, query: Option<&Query>) {
    let q = query.map(Query::as_str).unwrap_or("");
    let _ = writeln!(out, "Search results for: {}\n", q);
}
