//! News search feed pipeline.
//!
//! One search runs through these stages, each of which may end it early:
//!
//! - **Fetching**: a single GET against the search endpoint with a 10s timeout
//! - **Validation**: status must be exactly 200; leading whitespace and BOM
//!   are stripped and an empty body is rejected
//! - **Parsing**: strict XML parse, retried once from `<?xml` or `<rss` when
//!   the body carries a non-XML preamble
//! - **Extraction**: `channel/item` nodes, or any `item` node when there are
//!   none; items without a usable link are dropped
//!
//! # Architecture
//!
//! - [`fetcher`] - URL construction and the HTTP request
//! - [`validate`] - Status and body checks
//! - [`parser`] - XML parsing with fallback
//! - [`extract`] - Item location and field access
//! - [`pipeline`] - Wires the stages together into an [`Outcome`]
//!
//! # Example
//!
//! ```ignore
//! use newsgrep::feed::{search, FeedFetcher};
//!
//! let fetcher = FeedFetcher::new()?;
//! let outcome = search(&fetcher, Query::sanitize("wildfire").as_ref(), &ctx).await;
//! ```

pub mod extract;
pub mod fetcher;
pub mod parser;
pub mod pipeline;
pub mod validate;

pub use extract::{extract_items, Extraction, ItemStrategy, ResultItem, SkippedItem};
pub use fetcher::{FeedFetcher, FetchedResponse, SearchEndpoint, TransportError};
pub use parser::{parse_feed, Anchor, FeedDocument, ParseStage, XmlParseError};
pub use pipeline::{evaluate, search, Outcome, ParseFailure, SearchError};
pub use validate::{normalize_body, validate};
