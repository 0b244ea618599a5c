//! Core layer: pure transformations used by the transfer effects.

use percent_encoding::percent_decode_str;

use crate::error::{FetchError, Result};

/// Resolve the local file name of a URL: its last non-empty path segment.
///
/// ```
/// use railhead_fetch::file_name_from_url;
///
/// let name = file_name_from_url("https://x/releases/app.tar.bz2?token=1").unwrap();
/// assert_eq!(name, "app.tar.bz2");
/// ```
pub fn file_name_from_url(url: &str) -> Result<String> {
    let invalid = |reason: &str| FetchError::InvalidUrl {
        url:    url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = url::Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
    let segment = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .ok_or_else(|| invalid("no file name in path"))?;

    let decoded = percent_decode_str(segment).decode_utf8_lossy().into_owned();
    if decoded == "." || decoded == ".." || decoded.contains('/') || decoded.contains('\\') {
        return Err(invalid("file name is not a plain path segment"));
    }
    Ok(decoded)
}

/// Interpret a raw `Content-Length` value. Absent or malformed values are `0`.
pub fn parse_content_length(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(0)
}

/// Whether an HTTP status counts as a successful transfer.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
