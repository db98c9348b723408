use serde::Serialize;

use crate::feed::{Outcome, ResultItem, SearchError};
use crate::host::HostContext;
use crate::query::Query;
use crate::render::{error_kind, user_message};

#[derive(Serialize)]
struct Report<'a> {
    query: Option<&'a Query>,
    status: &'static str,
    items: &'a [ResultItem],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport<'a>>,
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<&'a str>,
    /// Raw payload, only for privileged debug sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
}

/// Renders an outcome as a single JSON object.
pub fn render_json(query: Option<&Query>, outcome: &Outcome, ctx: &HostContext) -> String {
    let status = match outcome {
        Outcome::Success(_) => "success",
        Outcome::EmptyQuery => "empty_query",
        Outcome::NoResults => "no_results",
        Outcome::Failed(_) => "error",
    };

    let error = match outcome {
        Outcome::Failed(err) => Some(error_report(err, ctx)),
        _ => None,
    };

    let report = Report {
        query,
        status,
        items: outcome.items(),
        error,
    };

    // Serializing plain structs of strings and numbers cannot fail
    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to serialize JSON report");
        String::from("{}")
    })
}

fn error_report<'a>(err: &'a SearchError, ctx: &HostContext) -> ErrorReport<'a> {
    let mut report = ErrorReport {
        kind: error_kind(err),
        message: user_message(err),
        http_status: None,
        content_type: None,
        body: None,
    };

    match err {
        SearchError::Status { code, .. } => report.http_status = Some(*code),
        SearchError::Parse(failure) => {
            report.http_status = Some(failure.status);
            report.content_type = failure.content_type.as_deref();
            if ctx.show_raw_payloads() {
                report.body = Some(failure.body.as_str());
            }
        }
        SearchError::Transport(_) | SearchError::EmptyBody => {}
    }

    report
}
