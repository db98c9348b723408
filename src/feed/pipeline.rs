use thiserror::Error;

use crate::feed::extract::{extract_items, ResultItem};
use crate::feed::fetcher::{FeedFetcher, FetchedResponse, TransportError};
use crate::feed::parser::{parse_feed, ParseStage};
use crate::feed::validate::validate;
use crate::host::{HostContext, ADMIN_EXCERPT_BYTES, LOG_EXCERPT_BYTES};
use crate::query::Query;
use crate::util::truncate_bytes;

/// Failures that end a search before any results can be shown.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No response was obtained (network, timeout, oversized body)
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The server answered with something other than 200
    #[error("HTTP error: status {code}")]
    Status { code: u16, url: String },
    /// Status 200 but nothing in the body
    #[error("Empty response body")]
    EmptyBody,
    /// Neither the direct nor the fallback parse produced a document
    #[error("Parse error: {}", .0.direct_error)]
    Parse(ParseFailure),
}

/// Diagnostic context for a body that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub status: u16,
    pub content_type: Option<String>,
    /// Start of the normalized body, at most 16384 bytes.
    pub body: String,
    pub direct_error: String,
    /// Offset and error of the fallback attempt, if an anchor was found.
    pub fallback_error: Option<(usize, String)>,
}

impl ParseFailure {
    /// The first 8192 bytes of the body, as written to the diagnostic log.
    pub fn excerpt(&self) -> &str {
        truncate_bytes(&self.body, LOG_EXCERPT_BYTES)
    }
}

/// The single result of one search invocation.
#[derive(Debug)]
pub enum Outcome {
    /// At least one valid item, in feed order.
    Success(Vec<ResultItem>),
    /// No query was given; nothing was fetched.
    EmptyQuery,
    /// The feed parsed but held no usable items.
    NoResults,
    Failed(SearchError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Whether the outcome represents a failure of the search itself.
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn items(&self) -> &[ResultItem] {
        match self {
            Outcome::Success(items) => items,
            _ => &[],
        }
    }
}

impl From<SearchError> for Outcome {
    fn from(err: SearchError) -> Self {
        Outcome::Failed(err)
    }
}

/// Runs one search end to end.
///
/// `None` means the host had no query to offer; the outcome is
/// [`Outcome::EmptyQuery`] and the network is never touched.
///
/// # Arguments
///
/// * `fetcher` - HTTP client and endpoint; reusable across searches
/// * `query` - Sanitized query, or `None` when the input was blank
/// * `ctx` - Debug and privilege flags of the caller
pub async fn search(fetcher: &FeedFetcher, query: Option<&Query>, ctx: &HostContext) -> Outcome {
    let Some(query) = query else {
        return Outcome::EmptyQuery;
    };

    tracing::info!(query = %query, "Searching news feed");

    let response = match fetcher.fetch(query).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "Search feed request failed");
            return SearchError::Transport(e).into();
        }
    };

    evaluate(&response, ctx)
}

/// Turns a fetched response into an outcome.
///
/// This is everything after the network call: validation, parsing with
/// fallback, and extraction. It is a pure function of the response, so the
/// same response always yields the same outcome.
///
/// # Arguments
///
/// * `response` - Status, headers and raw body as received
/// * `ctx` - Decides whether diagnostics for rejected responses and skipped
///   items are logged
///
/// # Returns
///
/// - [`Outcome::Success`] - At least one valid item
/// - [`Outcome::NoResults`] - The feed parsed but no item survived extraction
/// - [`Outcome::Failed`] with [`SearchError::Status`] - Status other than 200
/// - [`Outcome::Failed`] with [`SearchError::EmptyBody`] - Nothing after BOM and whitespace
/// - [`Outcome::Failed`] with [`SearchError::Parse`] - Neither parse attempt succeeded
pub fn evaluate(response: &FetchedResponse, ctx: &HostContext) -> Outcome {
    let diagnostics = ctx.diagnostics();

    let body = match validate(response) {
        Ok(body) => body,
        Err(err) => {
            if let SearchError::Status { code, url } = &err {
                diagnostics.non_success_status(*code, url);
            }
            return err.into();
        }
    };

    let feed = match parse_feed(&body) {
        Ok(feed) => feed,
        Err(err) => {
            let content_type = response.content_type();
            diagnostics.parse_failed(response.status, content_type, &body);
            return SearchError::Parse(ParseFailure {
                status: response.status,
                content_type: content_type.map(str::to_string),
                body: truncate_bytes(&body, ADMIN_EXCERPT_BYTES).to_string(),
                direct_error: err.direct.to_string(),
                fallback_error: err.fallback.map(|(offset, e)| (offset, e.to_string())),
            })
            .into();
        }
    };

    if let ParseStage::Fallback { offset, anchor } = feed.stage() {
        tracing::info!(offset = offset, anchor = ?anchor, "Recovered feed after non-XML preamble");
    }

    let extraction = extract_items(&feed);
    for skipped in &extraction.skipped {
        diagnostics.skipped_item(skipped.index, &skipped.reason, &skipped.excerpt);
    }

    tracing::debug!(
        strategy = ?extraction.strategy,
        candidates = extraction.candidates,
        valid = extraction.items.len(),
        skipped = extraction.skipped.len(),
        "Extracted feed items"
    );

    if extraction.items.is_empty() {
        diagnostics.no_items(&body);
        return Outcome::NoResults;
    }

    Outcome::Success(extraction.items)
}
