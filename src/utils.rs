//! Helpers for page titles and log output.
//!
//! This module provides the small string routines shared by the fetcher,
//! the link extractor and the search engine:
//! - Percent-encoding a page title for use in a request URL
//! - Percent-decoding a title taken from an `href`
//! - Case-insensitive title comparison used for target matching
//! - String truncation for logging

/// Characters left literal when a title is placed into a request URL,
/// in addition to the RFC 3986 unreserved set that `urlencoding` keeps.
const TITLE_SAFE_CHARS: &[char] = &['(', ')', '_', ',', '-', '/'];

/// Percent-encode a page title for use as the last path segment of a URL.
///
/// Parentheses, commas and slashes are kept as-is because article URLs use
/// them literally (e.g. `Mercury_(planet)`).
///
/// # Examples
///
/// ```ignore
/// assert_eq!(encode_title("Mercury_(planet)"), "Mercury_(planet)");
/// assert_eq!(encode_title("Бумага"), "%D0%91%D1%83%D0%BC%D0%B0%D0%B3%D0%B0");
/// ```
pub fn encode_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut buf = [0u8; 4];
    for c in title.chars() {
        if TITLE_SAFE_CHARS.contains(&c) {
            out.push(c);
        } else {
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    out
}

/// Decode a percent-escaped title.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD instead of failing.
pub fn decode_title(raw: &str) -> String {
    let bytes = urlencoding::decode_binary(raw.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Compare two titles ignoring case.
pub fn same_title(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last character boundary at or before `max`
/// bytes and get a `"…(+N bytes)"` suffix.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
