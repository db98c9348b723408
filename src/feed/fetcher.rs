use std::time::Duration;

use futures::StreamExt;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use thiserror::Error;

use crate::query::Query;

/// Connect and overall request timeout for the single search request.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Client identification sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible)";
const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// RFC 3986 unreserved characters stay literal; everything else is escaped.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Transport-level failures: nothing usable came back from the server.
///
/// HTTP status codes are not transport errors; any response that arrives is
/// handed to the validator.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network-level error (DNS, connection, TLS, body read, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Request exceeded the 10-second timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
}

/// The search feed location and its fixed locale parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEndpoint {
    pub base_url: String,
    /// Interface language (`hl`)
    pub language: String,
    /// Region (`gl`)
    pub region: String,
    /// Edition identifier (`ceid`), `REGION:lang`
    pub edition: String,
}

impl Default for SearchEndpoint {
    fn default() -> Self {
        Self {
            base_url: "https://news.google.com/rss/search".to_string(),
            language: "en-US".to_string(),
            region: "US".to_string(),
            edition: "US:en".to_string(),
        }
    }
}

impl SearchEndpoint {
    /// Builds the feed URL for a query.
    ///
    /// Only the query is percent-encoded; the locale parameters are trusted
    /// constants and are inserted as-is.
    pub fn url_for(&self, query: &Query) -> String {
        format!(
            "{}?q={}&hl={}&gl={}&ceid={}",
            self.base_url,
            utf8_percent_encode(query.as_str(), QUERY_ENCODE_SET),
            self.language,
            self.region,
            self.edition
        )
    }
}

/// Raw response from the search endpoint, before any validation.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    /// URL that was requested
    pub url: String,
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl FetchedResponse {
    /// The `Content-Type` header, if present and valid UTF-8.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Issues the single search request for a query.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: reqwest::Client,
    endpoint: SearchEndpoint,
}

impl FeedFetcher {
    /// Creates a fetcher for the default Google News endpoint.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_endpoint(SearchEndpoint::default())
    }

    /// Creates a fetcher for a specific endpoint (mock servers in tests).
    pub fn with_endpoint(endpoint: SearchEndpoint) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(FETCH_TIMEOUT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { client, endpoint })
    }

    /// Fetches the search feed for `query`.
    ///
    /// One attempt, no retries. A response with any status code is returned
    /// as-is; only failures to obtain a response at all are errors.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Network`] - Connection, DNS, TLS or body read errors
    /// - [`TransportError::Timeout`] - No response within 10 seconds
    /// - [`TransportError::ResponseTooLarge`] - Body exceeded 10MB
    pub async fn fetch(&self, query: &Query) -> Result<FetchedResponse, TransportError> {
        let url = self.endpoint.url_for(query);
        tracing::debug!(url = %url, "Fetching search feed");

        let response = tokio::time::timeout(FETCH_TIMEOUT, self.client.get(&url).send())
            .await
            .map_err(|_| TransportError::Timeout)?
            .map_err(map_send_error)?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = read_limited_bytes(response, MAX_FEED_SIZE).await?;

        tracing::debug!(status = status, bytes = body.len(), "Search feed received");

        Ok(FetchedResponse {
            url,
            status,
            headers,
            body,
        })
    }
}

fn map_send_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, TransportError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(TransportError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_send_error)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(TransportError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
