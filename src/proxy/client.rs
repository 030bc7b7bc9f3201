//! Upstream CMS client.
//!
//! # Responsibilities
//! - Own the single outbound connection pool
//! - Inject the server credential into every call
//! - Buffer upstream responses for reshaping
//!
//! # Design Decisions
//! - Redirects are followed, but paths are normalized so none are expected
//! - No retries; a failed call surfaces as a gateway error

use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::http::{header, HeaderMap, StatusCode};
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::http::X_REQUEST_ID;
use crate::observability::metrics;
use crate::proxy::params::merge_query_params;
use crate::proxy::path::upstream_url;

/// A fully buffered upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Upstream `content-type`, if present and readable.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// True when upstream declared a JSON body.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false)
    }
}

/// Client for the versioned CMS REST API.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
    api_prefix: String,
    token: String,
}

impl UpstreamClient {
    /// Build a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> BridgeResult<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .user_agent(concat!("cms-bridge/", env!("CARGO_PKG_VERSION")));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(BridgeError::Client)?;
        let base_url = Url::parse(&config.base_url).map_err(BridgeError::BaseUrl)?;

        Ok(Self {
            http,
            base_url,
            api_prefix: config.api_prefix.clone(),
            token: config.api_token().unwrap_or_default().to_string(),
        })
    }

    /// Whether a non-empty API token is configured.
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    /// GET the resource at `segments` under the API prefix.
    ///
    /// Each segment is encoded on its own. Any `auth_token` in `params` is
    /// replaced by the server token.
    pub async fn get<I>(
        &self,
        segments: &[&str],
        params: I,
        request_id: Option<&str>,
    ) -> BridgeResult<UpstreamResponse>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let url = upstream_url(&self.base_url, &self.api_prefix, segments)?;
        let query = merge_query_params(params, &self.token);
        let start = Instant::now();

        tracing::debug!(
            url = %url,
            params = query.len(),
            request_id = request_id.unwrap_or("unknown"),
            "Forwarding to upstream"
        );

        let mut request = self.http.get(url.clone()).query(&query);
        if let Some(id) = request_id {
            request = request.header(X_REQUEST_ID, id);
        }

        let response = request.send().await.map_err(|e| {
            metrics::record_upstream("error", start);
            BridgeError::from_transport(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(BridgeError::from_transport)?;

        metrics::record_upstream(status.as_str(), start);
        tracing::debug!(
            url = %url,
            status = %status,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
