//! Google News search over RSS.
//!
//! A query goes through [`feed::search`] and comes back as exactly one
//! [`feed::Outcome`], which [`render`] turns into HTML, text or JSON.
//!
//! ```ignore
//! use newsgrep::{feed, render, HostContext, Query};
//!
//! let fetcher = feed::FeedFetcher::new()?;
//! let query = Query::sanitize("wildfire");
//! let ctx = HostContext::default();
//! let outcome = feed::search(&fetcher, query.as_ref(), &ctx).await;
//! println!("{}", render::render_html(query.as_ref(), &outcome, &ctx));
//! ```

pub mod config;
pub mod feed;
pub mod host;
pub mod query;
pub mod render;
pub mod util;

pub use host::HostContext;
pub use query::Query;
