//! Content length extraction utilities.
//!
//! Helpers to work out the full size of a resource from a (possibly ranged)
//! response, supporting both Content-Range and Content-Length headers.

use reqwest::{header::CONTENT_RANGE, Response};

/// Parse Content-Range header to extract total size.
///
/// Content-Range header format: "bytes start-end/total". An unknown total
/// (`*`) yields `None`.
///
/// # Example
///
/// ```rust
/// use sluice::utils::parse_content_range_total;
///
/// assert_eq!(parse_content_range_total("bytes 0-1023/2048"), Some(2048));
/// assert_eq!(parse_content_range_total("bytes 0-1023/*"), None);
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    let (_, total) = content_range.split_once('/')?;
    total.trim().parse::<u64>().ok()
}

/// Expected size of the complete resource once the body of `response` has
/// been appended to `offset` bytes already held by the caller.
///
/// The total from a Content-Range header wins; otherwise the Content-Length
/// of the body is added to `offset`. Returns `None` when neither is known.
pub fn expected_total(response: &Response, offset: u64) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_RANGE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_content_range_total)
        .or_else(|| {
            response
                .content_length()
                .map(|len| len.saturating_add(offset))
        })
}
