//! Upstream URL construction.
//!
//! The CMS answers `posts` with a 301 to `posts/`, so every URL carries a
//! trailing slash. Caller-supplied segments (slugs, page types) arrive
//! percent-decoded and are encoded again one segment at a time: a `/`, `?`
//! or `#` inside a slug stays inside that segment.

use url::Url;

use crate::error::{BridgeError, BridgeResult};

/// A segment that may be placed under the API prefix.
///
/// Empty and dot segments are refused since URL resolution would collapse
/// them and move the request out of the prefix.
pub fn is_valid_segment(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
}

/// Join base URL, API prefix and path segments into the upstream URL.
pub fn upstream_url(base: &Url, api_prefix: &str, segments: &[&str]) -> BridgeResult<Url> {
    if let Some(bad) = segments.iter().find(|s| !is_valid_segment(s)) {
        return Err(BridgeError::InvalidPath(bad.to_string()));
    }

    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| BridgeError::InvalidPath(base.to_string()))?
        .clear()
        .extend(api_prefix.split('/').filter(|s| !s.is_empty()))
        .extend(segments)
        .push("");
    Ok(url)
}
