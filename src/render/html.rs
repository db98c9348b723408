use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::feed::{Outcome, ParseFailure, SearchError};
use crate::host::HostContext;
use crate::query::Query;
use crate::render::{user_message, NO_RESULTS, PROMPT, STYLESHEET};

/// Renders a full page body: the stylesheet once, then the result fragment.
pub fn render_page(query: Option<&Query>, outcome: &Outcome, ctx: &HostContext) -> String {
    let mut page = String::from(STYLESHEET);
    page.push_str(&render_html(query, outcome, ctx));
    page
}

/// Renders the result fragment for one outcome.
///
/// Text (query echo, titles, diagnostics) is HTML-escaped; links are escaped
/// as double-quoted attribute values.
///
/// # Arguments
///
/// * `query` - Echoed in the results heading; ignored for prompt and error states
/// * `outcome` - The single outcome of the search
/// * `ctx` - With `debug` and `privileged` both set, a parse failure shows
///   the raw response instead of the generic message
///
/// # Returns
///
/// One of, each line terminated by `\n`:
/// - `<p id="search-prompt">` for an empty query
/// - `<p id="search-error">`, or the `search-debug` panel, for a failure
/// - An `<h2>` heading followed by a `<p>` for no results
/// - An `<h2>` heading followed by a `<ul class="search-results">` list
pub fn render_html(query: Option<&Query>, outcome: &Outcome, ctx: &HostContext) -> String {
    let mut out = String::new();

    match outcome {
        Outcome::EmptyQuery => {
            let _ = writeln!(out, r#"<p id="search-prompt">{}</p>"#, PROMPT);
        }
        Outcome::Failed(SearchError::Parse(failure)) if ctx.show_raw_payloads() => {
            debug_panel(&mut out, failure);
        }
        Outcome::Failed(err) => {
            let _ = writeln!(
                out,
                r#"<p id="search-error">{}</p>"#,
                encode_text(&user_message(err))
            );
        }
        Outcome::NoResults => {
            heading(&mut out, query);
            let _ = writeln!(out, "<p>{}</p>", NO_RESULTS);
        }
        Outcome::Success(items) => {
            heading(&mut out, query);
            out.push_str("<ul class=\"search-results\">\n");
            for item in items {
                let _ = writeln!(
                    out,
                    r#"<li><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></li>"#,
                    encode_double_quoted_attribute(&item.link),
                    encode_text(&item.title)
                );
            }
            out.push_str("</ul>\n");
        }
    }

    out
}

fn heading(out: &mut String, query: Option<&Query>) {
    let q = query.map(Query::as_str).unwrap_or("");
    let _ = writeln!(out, "<h2>Search Results for: {}</h2>", encode_text(q));
}

fn debug_panel(out: &mut String, failure: &ParseFailure) {
    out.push_str("<div class=\"search-debug\">\n");
    out.push_str("<strong>Search debug: response could not be parsed as XML</strong>\n");
    let _ = writeln!(
        out,
        "<p>HTTP code: {} | Content-Type: {}</p>",
        failure.status,
        encode_text(failure.content_type.as_deref().unwrap_or(""))
    );
    let _ = writeln!(out, "<p>Parser: {}</p>", encode_text(&failure.direct_error));
    if let Some((offset, err)) = &failure.fallback_error {
        let _ = writeln!(
            out,
            "<p>Fallback at byte {}: {}</p>",
            offset,
            encode_text(err)
        );
    }
    let _ = writeln!(out, "<pre>{}</pre>", encode_text(&failure.body));
    out.push_str("</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::ResultItem;
    use pretty_assertions::assert_eq;

    fn item(title: &str, link: &str) -> ResultItem {
        ResultItem {
            title: title.to_string(),
            link: link.to_string(),
            source: None,
            published: None,
        }
    }

    fn parse_failure() -> Outcome {
        Outcome::Failed(SearchError::Parse(ParseFailure {
            status: 200,
            content_type: Some("text/html".to_string()),
            body: "<html><script>alert(1)</script>".to_string(),
            direct_error: "unexpected token".to_string(),
            fallback_error: None,
        }))
    }

    #[test]
    fn test_success_list() {
        let q = Query::sanitize("wildfire").unwrap();
        let html = render_html(
            Some(&q),
            &Outcome::Success(vec![item("A", "http://x/1"), item("B", "http://x/2")]),
            &HostContext::default(),
        );
        assert_eq!(
            html,
            "<h2>Search Results for: wildfire</h2>\n\
             <ul class=\"search-results\">\n\
             <li><a href=\"http://x/1\" target=\"_blank\" rel=\"noopener noreferrer\">A</a></li>\n\
             <li><a href=\"http://x/2\" target=\"_blank\" rel=\"noopener noreferrer\">B</a></li>\n\
             </ul>\n"
        );
    }

    #[test]
    fn test_text_and_links_escaped() {
        let q = Query::sanitize("<script>").unwrap();
        let html = render_html(
            Some(&q),
            &Outcome::Success(vec![item(
                "Fire & <Rain>",
                "https://x.example/a?b=1&c=\"2\"",
            )]),
            &HostContext::default(),
        );
        assert!(html.contains("Search Results for: &lt;script&gt;"));
        assert!(html.contains(">Fire &amp; &lt;Rain&gt;</a>"));
        assert!(html.contains("href=\"https://x.example/a?b=1&amp;c=&quot;2&quot;\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_empty_query_prompt() {
        let html = render_html(None, &Outcome::EmptyQuery, &HostContext::default());
        assert_eq!(
            html,
            "<p id=\"search-prompt\">Please enter a search term above to search Google News.</p>\n"
        );
    }

    #[test]
    fn test_no_results_has_heading_but_no_list() {
        let q = Query::sanitize("zzz").unwrap();
        let html = render_html(Some(&q), &Outcome::NoResults, &HostContext::default());
        assert!(html.starts_with("<h2>Search Results for: zzz</h2>"));
        assert!(html.contains("<p>No results found.</p>"));
        assert!(!html.contains("<ul"));
    }

    #[test]
    fn test_status_error_without_heading() {
        let q = Query::sanitize("wildfire").unwrap();
        let html = render_html(
            Some(&q),
            &Outcome::Failed(SearchError::Status {
                code: 500,
                url: "u".into(),
            }),
            &HostContext::default(),
        );
        assert_eq!(
            html,
            "<p id=\"search-error\">Error fetching results (HTTP 500). Please try again later.</p>\n"
        );
    }

    #[test]
    fn test_parse_error_generic_unless_privileged_debug() {
        for ctx in [
            HostContext::default(),
            HostContext::new(true, false),
            HostContext::new(false, true),
        ] {
            let html = render_html(None, &parse_failure(), &ctx);
            assert_eq!(html, "<p id=\"search-error\">Unable to parse response.</p>\n");
        }
    }

    #[test]
    fn test_parse_error_panel_for_privileged_debug() {
        let html = render_html(None, &parse_failure(), &HostContext::new(true, true));
        assert!(html.contains("class=\"search-debug\""));
        assert!(html.contains("HTTP code: 200 | Content-Type: text/html"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_page_emits_stylesheet_once() {
        let q = Query::sanitize("x").unwrap();
        let page = render_page(Some(&q), &Outcome::NoResults, &HostContext::default());
        assert!(page.starts_with(STYLESHEET));
        assert_eq!(page.matches("<style").count(), 1);
    }
}
