use thiserror::Error;
use url::Url;

/// Errors that can occur while validating an item link.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LinkError {
    /// The link element was present but held no text.
    #[error("Link is empty")]
    Empty,
    /// The link text could not be parsed as an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The link uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// Validates the text of an item's `<link>` element.
///
/// A link is resolvable when it parses as an absolute URL with an `http` or
/// `https` scheme. Anything else (`javascript:`, `data:`, relative paths) would
/// be unsafe or meaningless as an anchor target and is rejected.
///
/// Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use newsgrep::util::validate_link;
///
/// let url = validate_link(" https://news.example.com/a?id=1 ").unwrap();
/// assert_eq!(url.host_str(), Some("news.example.com"));
///
/// assert!(validate_link("javascript:alert(1)").is_err());
/// assert!(validate_link("/relative/path").is_err());
/// assert!(validate_link("").is_err());
/// ```
pub fn validate_link(link: &str) -> Result<Url, LinkError> {
    let trimmed = link.trim();
    if trimmed.is_empty() {
        return Err(LinkError::Empty);
    }

    let url = Url::parse(trimmed)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(LinkError::UnsupportedScheme(scheme.to_owned())),
    }
}
