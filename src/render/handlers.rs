//! HTML routes: `/`, `/blog`, `/blog/{slug}`.

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::error::BridgeResult;
use crate::http::request_id;
use crate::http::server::AppState;
use crate::proxy::client::UpstreamResponse;
use crate::proxy::params::parse_query;
use crate::render::pagination::PageRequest;

/// Plain-text error page carrying the upstream status.
fn upstream_failure(prefix: &str, upstream: &UpstreamResponse) -> Response {
    tracing::warn!(status = %upstream.status, "{}", prefix);
    (
        upstream.status,
        format!("{} ({})", prefix, upstream.status.as_u16()),
    )
        .into_response()
}

/// Last value of `key` in the query, mirroring how form values override.
fn last_value<'a>(items: &'a [(String, String)], key: &str) -> Option<&'a str> {
    items
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// `GET /`
pub async fn home(State(state): State<AppState>) -> BridgeResult<Html<String>> {
    Ok(Html(state.renderer.home()?))
}

/// `GET /blog?page=&page_size=`
pub async fn blog_index(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> BridgeResult<Response> {
    let items = parse_query(query.as_deref());
    let page = PageRequest::from_query(
        last_value(&items, "page"),
        last_value(&items, "page_size"),
        &state.blog,
    );

    let upstream = state
        .upstream
        .get(&["posts"], page.upstream_params(), request_id(&headers))
        .await?;
    if upstream.status != StatusCode::OK {
        return Ok(upstream_failure("Error al cargar posts", &upstream));
    }

    let html = state.renderer.blog_index(&upstream.body, &page)?;
    Ok(Html(html).into_response())
}

/// `GET /blog/{slug}`
pub async fn blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> BridgeResult<Response> {
    let upstream = state
        .upstream
        .get(&["posts", &slug], Vec::<(String, String)>::new(), request_id(&headers))
        .await?;
    if upstream.status != StatusCode::OK {
        return Ok(upstream_failure("Post no encontrado", &upstream));
    }

    let html = state.renderer.blog_post(&upstream.body)?;
    Ok(Html(html).into_response())
}
