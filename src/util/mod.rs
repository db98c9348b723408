//! Utility functions for common operations.
//!
//! This module provides reusable utilities for:
//!
//! - **Link validation**: accept only absolute http(s) links from feed items
//! - **Text processing**: Unicode-aware width calculation, truncation, and
//!   stripping of terminal control sequences from untrusted text
//!
//! # Examples
//!
//! ```
//! use newsgrep::util::{validate_link, display_width, truncate_to_width};
//!
//! let url = validate_link("https://example.com/story").unwrap();
//! assert_eq!(url.scheme(), "https");
//!
//! assert_eq!(display_width("Hello 世界"), 10);
//! assert_eq!(truncate_to_width("Long article title", 10), "Long ar...");
//! ```

mod text;
mod url_validator;

pub use text::{
    collapse_whitespace, display_width, strip_control_chars, truncate_bytes, truncate_to_width,
};
pub use url_validator::{validate_link, LinkError};
