//! Cache header passthrough.
//!
//! Only the headers a browser or CDN needs to cache the upstream answer are
//! copied; everything else the upstream sends stays on the bridge.

use axum::http::{header, HeaderMap, HeaderName};

/// Upstream response headers forwarded to the client.
pub const CACHE_HEADERS: [HeaderName; 4] = [
    header::CACHE_CONTROL,
    header::ETAG,
    header::LAST_MODIFIED,
    header::EXPIRES,
];

/// Copy safelisted cache headers from `upstream` into `downstream`.
///
/// Existing downstream values for those headers are replaced. When upstream
/// repeats a header only its first value is kept.
pub fn copy_cache_headers(upstream: &HeaderMap, downstream: &mut HeaderMap) {
    for name in CACHE_HEADERS.iter() {
        if let Some(value) = upstream.get(name) {
            downstream.insert(name.clone(), value.clone());
        }
    }
}
