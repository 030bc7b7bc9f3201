//! Credential-injecting proxy to the CMS API.
//!
//! # Data Flow
//! ```text
//! GET /v2/... (client)
//!     → params.rs (decode query, drop client auth_token, append server token)
//!     → path.rs (per-segment encoding, trailing slash)
//!     → client.rs (shared reqwest pool, buffered response)
//!     → headers.rs (copy cache headers only)
//!     → handlers.rs (same status, JSON or text body)
//! ```

pub mod client;
pub mod handlers;
pub mod headers;
pub mod params;
pub mod path;

pub use client::{UpstreamClient, UpstreamResponse};
pub use headers::{copy_cache_headers, CACHE_HEADERS};
pub use params::{merge_query_params, parse_query, AUTH_PARAM};
pub use path::upstream_url;
