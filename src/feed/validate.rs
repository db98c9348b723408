use crate::feed::fetcher::FetchedResponse;
use crate::feed::pipeline::SearchError;

/// UTF-8 byte-order mark as it appears after lossy decoding.
const BOM: char = '\u{feff}';

/// Checks a fetched response and returns its normalized body text.
///
/// Only status 200 is accepted; other 2xx codes are as unexpected from a
/// search feed as a 404. The body is decoded lossily so that a stray invalid
/// byte becomes a parse problem rather than an early rejection.
///
/// # Errors
///
/// - [`SearchError::Status`] - Status code other than 200
/// - [`SearchError::EmptyBody`] - Nothing left after normalization
pub fn validate(response: &FetchedResponse) -> Result<String, SearchError> {
    if response.status != 200 {
        return Err(SearchError::Status {
            code: response.status,
            url: response.url.clone(),
        });
    }

    let text = String::from_utf8_lossy(&response.body);
    let body = normalize_body(&text);
    if body.is_empty() {
        return Err(SearchError::EmptyBody);
    }

    Ok(body.to_string())
}

/// Strips leading whitespace and a leading byte-order mark.
///
/// Whitespace is removed on both sides of the BOM, since some servers emit
/// the mark after a stray newline and others emit blank lines after the mark.
pub fn normalize_body(body: &str) -> &str {
    let body = body.trim_start();
    match body.strip_prefix(BOM) {
        Some(rest) => rest.trim_start(),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use reqwest::header::HeaderMap;

    fn response(status: u16, body: &[u8]) -> FetchedResponse {
        FetchedResponse {
            url: "https://news.example.com/rss/search?q=x".to_string(),
            status,
            headers: HeaderMap::new(),
            body: body.to_vec(),
        }
    }

    #[test]
    fn test_200_with_body_is_valid() {
        let body = validate(&response(200, b"<rss/>")).unwrap();
        assert_eq!(body, "<rss/>");
    }

    #[test]
    fn test_non_200_statuses_rejected_with_code() {
        for code in [201, 204, 301, 404, 500] {
            match validate(&response(code, b"<rss/>")) {
                Err(SearchError::Status { code: got, url }) => {
                    assert_eq!(got, code);
                    assert!(url.contains("q=x"));
                }
                other => panic!("Expected Status({}), got {:?}", code, other),
            }
        }
    }

    #[test]
    fn test_bom_and_whitespace_stripped() {
        let mut raw = b"\xEF\xBB\xBF".to_vec();
        raw.extend_from_slice(b"<?xml version=\"1.0\"?><rss/>");
        assert_eq!(
            validate(&response(200, &raw)).unwrap(),
            "<?xml version=\"1.0\"?><rss/>"
        );

        assert_eq!(normalize_body("\n  \u{feff}<rss/>"), "<rss/>");
        assert_eq!(normalize_body("\u{feff}\r\n<rss/>"), "<rss/>");
    }

    #[test]
    fn test_only_one_leading_bom_removed() {
        assert_eq!(normalize_body("\u{feff}\u{feff}<rss/>"), "\u{feff}<rss/>");
    }

    #[test]
    fn test_empty_after_normalization() {
        assert!(matches!(
            validate(&response(200, b"")),
            Err(SearchError::EmptyBody)
        ));
        assert!(matches!(
            validate(&response(200, b" \n\xEF\xBB\xBF \t")),
            Err(SearchError::EmptyBody)
        ));
    }

    #[test]
    fn test_status_checked_before_body() {
        assert!(matches!(
            validate(&response(500, b"")),
            Err(SearchError::Status { code: 500, .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_normalized_body_has_no_leading_noise(s in "[ \\t\\r\\n\u{feff}]{0,4}[<a-z]{0,10}") {
            let out = normalize_body(&s);
            prop_assert!(!out.starts_with(char::is_whitespace));
            prop_assert!(s.ends_with(out));
        }
    }
}
