//! Error types shared by the proxy and renderer.
//!
//! # Design Decisions
//! - Upstream failures map to gateway statuses (502/504), never 500
//! - Upstream *status codes* are not errors; handlers pass them through
//! - Every error is logged once, when it is turned into a response

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::config::loader::ConfigError;

/// Errors raised while serving a request or building the server.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Upstream could not be reached or the transfer failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),

    /// Upstream did not answer within the configured deadline.
    #[error("upstream request timed out: {0}")]
    UpstreamTimeout(#[source] reqwest::Error),

    /// Upstream answered 200 with a body that is not the expected JSON.
    #[error("invalid upstream payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Template rendering failed.
    #[error("render error: {0}")]
    Render(#[from] tera::Error),

    /// A path segment that cannot be forwarded, such as `..`.
    #[error("invalid upstream path segment: {0:?}")]
    InvalidPath(String),

    /// The configured upstream base URL does not parse.
    #[error("invalid upstream base URL: {0}")]
    BaseUrl(#[source] url::ParseError),

    /// The outbound HTTP client could not be built.
    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Binding or serving the listener failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Classify a transport error from the upstream client.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BridgeError::UpstreamTimeout(err)
        } else {
            BridgeError::Upstream(err)
        }
    }

    /// HTTP status returned to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::Upstream(_) | BridgeError::InvalidPayload(_) => StatusCode::BAD_GATEWAY,
            BridgeError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            BridgeError::InvalidPath(_) => StatusCode::NOT_FOUND,
            BridgeError::Render(_)
            | BridgeError::BaseUrl(_)
            | BridgeError::Client(_)
            | BridgeError::Config(_)
            | BridgeError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "Request failed");
        } else {
            tracing::warn!(error = %self, status = %status, "Request rejected");
        }

        let message = match status {
            StatusCode::BAD_GATEWAY => "Bad Gateway",
            StatusCode::GATEWAY_TIMEOUT => "Gateway Timeout",
            StatusCode::NOT_FOUND => "Not Found",
            _ => "Internal Server Error",
        };
        (status, message).into_response()
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
