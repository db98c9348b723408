use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis appended to truncated terminal text
const ELLIPSIS: &str = "...";
/// Display width of the ellipsis (3 columns for ASCII "...")
const ELLIPSIS_WIDTH: usize = 3;

/// Calculates the display width of a string in terminal columns.
///
/// CJK characters and most emoji count as 2 columns, combining marks as 0.
///
/// ```
/// use newsgrep::util::display_width;
///
/// assert_eq!(display_width("Hello"), 5);
/// assert_eq!(display_width("你好"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncates a string to fit within `max_width` terminal columns.
///
/// When truncation is necessary "..." is appended and counted against the
/// budget. Widths of 3 or less have no room for an ellipsis, so as many
/// characters as fit are returned without one.
///
/// Returns `Cow::Borrowed` whenever the input already fits.
///
/// ```
/// use newsgrep::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("Test", 2), "Te");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let (budget, suffix) = if max_width <= ELLIPSIS_WIDTH {
        (max_width, "")
    } else {
        (max_width - ELLIPSIS_WIDTH, ELLIPSIS)
    };

    let mut used = 0;
    let mut cut = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        cut = idx + c.len_utf8();
    }

    Cow::Owned(format!("{}{}", &s[..cut], suffix))
}

/// Truncates a string to at most `max_bytes` bytes without splitting a
/// UTF-8 sequence.
///
/// Used for diagnostic excerpts of remote payloads, whose limits are
/// expressed in bytes.
///
/// ```
/// use newsgrep::util::truncate_bytes;
///
/// assert_eq!(truncate_bytes("abcdef", 4), "abcd");
/// // "é" is two bytes; cutting inside it backs off to the boundary
/// assert_eq!(truncate_bytes("aé", 2), "a");
/// ```
pub fn truncate_bytes(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Strips terminal control characters and ANSI escape sequences.
///
/// Feed titles and user queries are untrusted; printing them raw would let a
/// remote server move the cursor or retitle the terminal.
///
/// Removes C0 controls other than tab/newline/CR, DEL, C1 controls (U+0080 to
/// U+009F, which include the one-character CSI), CSI sequences
/// (`ESC [` ... final byte 0x40-0x7E), OSC sequences (`ESC ]` ... BEL or
/// `ESC \`), and a bare ESC.
///
/// Returns `Cow::Borrowed` when there is nothing to strip.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    fn is_stripped(c: char) -> bool {
        c == '\x7f'
            || ('\u{80}'..='\u{9f}').contains(&c)
            || (c < '\x20' && !matches!(c, '\t' | '\n' | '\r'))
    }

    if !s.chars().any(is_stripped) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            if !is_stripped(c) {
                out.push(c);
            }
            continue;
        }

        match chars.peek() {
            Some('[') => {
                chars.next();
                // Parameter and intermediate bytes up to and including the final byte
                for c in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    Cow::Owned(out)
}

/// Collapses every run of whitespace into a single space and trims both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ascii_truncation() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
        assert_eq!(truncate_to_width("Short", 10), "Short");
    }

    #[test]
    fn test_cjk_truncation() {
        // 2 columns per character: budget 7 - 3 = 4 fits two characters
        assert_eq!(truncate_to_width("你好世界", 7), "你好...");
        assert_eq!(truncate_to_width("你好世界", 5), "你...");
    }

    #[test]
    fn test_narrow_widths() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test", 1), "T");
        assert_eq!(truncate_to_width("Test", 3), "Tes");
        assert_eq!(truncate_to_width("你好", 1), "");
        assert_eq!(truncate_to_width("Testing", 4), "T...");
    }

    #[test]
    fn test_exact_fit_is_borrowed() {
        let result = truncate_to_width("12345", 5);
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_bytes_respects_char_boundaries() {
        assert_eq!(truncate_bytes("日本語", 4), "日");
        assert_eq!(truncate_bytes("日本語", 6), "日本");
        assert_eq!(truncate_bytes("short", 8192), "short");
        assert_eq!(truncate_bytes("", 0), "");
    }

    // ========================================================================
    // strip_control_chars tests
    // ========================================================================

    #[test]
    fn test_strip_clean_text_returns_borrowed() {
        let input = "wildfire updates\tand\nmore";
        let result = strip_control_chars(input);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, input);
    }

    #[test]
    fn test_strip_removes_controls_and_del() {
        assert_eq!(strip_control_chars("he\x00ll\x07o\x7f!"), "hello!");
    }

    #[test]
    fn test_strip_ansi_sequences() {
        assert_eq!(strip_control_chars("\x1b[31mRed\x1b[0m"), "Red");
        assert_eq!(strip_control_chars("\x1b]0;evil title\x07safe"), "safe");
        assert_eq!(strip_control_chars("\x1b]0;evil title\x1b\\safe"), "safe");
        assert_eq!(strip_control_chars("a\x1bb"), "ab");
    }

    #[test]
    fn test_strip_removes_c1_controls() {
        // U+009B is the single-character CSI
        assert_eq!(strip_control_chars("a\u{9b}31mb\u{85}c\u{80}"), "a31mbc");
        assert_eq!(strip_control_chars("café \u{a0}ok"), "café \u{a0}ok");
    }

    #[test]
    fn test_strip_unicode_preserved() {
        assert_eq!(strip_control_chars("日本語 \x1b[1m赤\x1b[0m"), "日本語 赤");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  climate \t\n change  "), "climate change");
        assert_eq!(collapse_whitespace(" \n\t "), "");
    }

    proptest! {
        #[test]
        fn prop_truncated_text_fits_width(s in "[a-zA-Z0-9 你好世界]{0,40}", width in 0usize..30) {
            let out = truncate_to_width(&s, width);
            prop_assert!(display_width(&out) <= width);
        }

        #[test]
        fn prop_truncate_bytes_is_prefix(s in "\\PC{0,40}", max in 0usize..64) {
            let out = truncate_bytes(&s, max);
            prop_assert!(out.len() <= max);
            prop_assert!(s.starts_with(out));
        }

        #[test]
        fn prop_stripped_text_has_no_escape(s in "[a-z\\[\\]\\x00-\\x1f\\x7f]{0,30}") {
            let out = strip_control_chars(&s);
            prop_assert!(!out.contains('\x1b'));
        }
    }
}
