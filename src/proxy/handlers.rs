//! JSON passthrough routes.

use axum::{
    body::Body,
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, HeaderValue, Response},
    response::IntoResponse,
};

use crate::error::BridgeResult;
use crate::http::server::AppState;
use crate::http::request_id;
use crate::proxy::client::UpstreamResponse;
use crate::proxy::headers::copy_cache_headers;
use crate::proxy::params::parse_query;

const TEXT_FALLBACK: &str = "text/plain; charset=utf-8";

/// Shape an upstream response for the client.
///
/// Status and body are kept. Only cache headers survive, and the content
/// type is either `application/json` or the upstream one.
pub fn passthrough_response(upstream: UpstreamResponse) -> Response<Body> {
    let content_type = if upstream.is_json() {
        HeaderValue::from_static("application/json")
    } else {
        upstream
            .headers
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(TEXT_FALLBACK))
    };

    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    copy_cache_headers(&upstream.headers, response.headers_mut());
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type);
    response
}

async fn forward(
    state: &AppState,
    headers: &HeaderMap,
    segments: &[&str],
    params: Vec<(String, String)>,
) -> BridgeResult<Response<Body>> {
    let upstream = state
        .upstream
        .get(segments, params, request_id(headers))
        .await?;
    Ok(passthrough_response(upstream))
}

/// `GET /v2/posts`
pub async fn list_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> BridgeResult<impl IntoResponse> {
    let params = parse_query(query.as_deref());
    forward(&state, &headers, &["posts"], params).await
}

/// `GET /v2/posts/{slug}`
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> BridgeResult<impl IntoResponse> {
    let params = parse_query(query.as_deref());
    forward(&state, &headers, &["posts", &slug], params).await
}

/// `GET /v2/pages/{page_type}`
pub async fn get_pages_by_type(
    State(state): State<AppState>,
    Path(page_type): Path<String>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> BridgeResult<impl IntoResponse> {
    let params = parse_query(query.as_deref());
    forward(&state, &headers, &["pages", &page_type], params).await
}

/// `GET /v2/pages/{page_type}/{slug}`
///
/// The CMS looks single pages up by filter, so the slug becomes a query
/// parameter on the page-type collection.
pub async fn get_page_by_type_and_slug(
    State(state): State<AppState>,
    Path((page_type, slug)): Path<(String, String)>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> BridgeResult<impl IntoResponse> {
    let mut params = parse_query(query.as_deref());
    params.push(("slug".to_string(), slug));
    forward(&state, &headers, &["pages", &page_type], params).await
}
