//! End-to-end tests for the server-rendered blog pages.

use axum::http::StatusCode;

mod common;

use common::{pairs, MockResponse, TOKEN};

const LISTING: &str = r#"{
    "meta": {"count": 7, "next_page": 3, "previous_page": 1},
    "data": [
        {"slug": "sueno-infantil", "title": "Sueño infantil", "summary": "Rutinas para dormir",
         "published": "2024-09-01T08:00:00Z", "body": "<p>ignored on the index</p>"},
        {"slug": "meriendas", "title": "Meriendas sanas", "summary": null, "published": null}
    ]
}"#;

#[tokio::test]
async fn test_blog_index_forwards_page_and_renders_cards() {
    let upstream = common::start_mock_upstream(|_| MockResponse::json(200, LISTING)).await;
    let bridge = common::start_bridge(upstream.addr).await;

    let res = common::client()
        .get(bridge.url("/blog?page=2&page_size=3&auth_token=leak"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let html = res.text().await.unwrap();
    assert!(html.contains(r#"<a href="/blog/sueno-infantil">Sueño infantil</a>"#));
    assert!(html.contains("Publicado el 2024-09-01"));
    assert!(html.contains("Meriendas sanas"));
    assert!(html.contains(r#"href="/blog?page=1&amp;page_size=3""#));
    assert!(html.contains(r#"href="/blog?page=3&amp;page_size=3""#));
    assert!(!html.contains(TOKEN));

    let request = upstream.only_request();
    assert_eq!(request.path, "/v2/posts/");
    assert_eq!(
        request.query,
        pairs(&[("page", "2"), ("page_size", "3"), ("auth_token", TOKEN)])
    );
}

#[tokio::test]
async fn test_blog_index_defaults() {
    let upstream = common::start_mock_upstream(|_| {
        MockResponse::json(200, r#"{"meta": {"next_page": null, "previous_page": null}, "data": []}"#)
    })
    .await;
    let bridge = common::start_bridge(upstream.addr).await;

    let html = common::client()
        .get(bridge.url("/blog?page=oops"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("No hay artículos disponibles"));
    assert!(html.contains("Página 1"));
    assert_eq!(
        upstream.only_request().query,
        pairs(&[("page", "1"), ("page_size", "9"), ("auth_token", TOKEN)])
    );
}

#[tokio::test]
async fn test_blog_index_upstream_error() {
    let upstream = common::start_mock_upstream(|_| {
        MockResponse::json(401, r#"{"detail": "Invalid token."}"#)
    })
    .await;
    let bridge = common::start_bridge(upstream.addr).await;

    let res = common::client().get(bridge.url("/blog")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.text().await.unwrap(), "Error al cargar posts (401)");
}

#[tokio::test]
async fn test_blog_post_renders_body() {
    let upstream = common::start_mock_upstream(|path| {
        assert_eq!(path, "/v2/posts/sueno-infantil/");
        MockResponse::json(
            200,
            r#"{"data": {"slug": "sueno-infantil", "title": "Sueño infantil",
                "published": "2024-09-01T08:00:00Z", "body": "<h2>Antes de dormir</h2>"}}"#,
        )
    })
    .await;
    let bridge = common::start_bridge(upstream.addr).await;

    let res = common::client()
        .get(bridge.url("/blog/sueno-infantil"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let html = res.text().await.unwrap();
    assert!(html.contains("<title>Nannyfy • Sueño infantil</title>"));
    assert!(html.contains("<h2>Antes de dormir</h2>"));
    assert_eq!(upstream.only_request().query, pairs(&[("auth_token", TOKEN)]));
}

#[tokio::test]
async fn test_blog_post_not_found() {
    let upstream = common::start_mock_upstream(|_| {
        MockResponse::json(404, r#"{"detail": "Not found."}"#)
    })
    .await;
    let bridge = common::start_bridge(upstream.addr).await;

    let res = common::client()
        .get(bridge.url("/blog/does-not-exist"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Post no encontrado (404)");
}

#[tokio::test]
async fn test_blog_post_encoded_query_in_slug_stays_in_path() {
    let upstream = common::start_mock_upstream(|_| {
        MockResponse::json(200, r#"{"data": {"title": "x"}}"#)
    })
    .await;
    let bridge = common::start_bridge(upstream.addr).await;

    let res = common::client()
        .get(bridge.url("/blog/x%3Fauth_token%3Devil"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let request = upstream.only_request();
    assert_eq!(request.path, "/v2/posts/x%3Fauth_token=evil/");
    assert_eq!(request.query, pairs(&[("auth_token", TOKEN)]));
}

#[tokio::test]
async fn test_blog_post_invalid_payload_is_bad_gateway() {
    let upstream = common::start_mock_upstream(|_| MockResponse::text(200, "<html>maintenance</html>")).await;
    let bridge = common::start_bridge(upstream.addr).await;

    let res = common::client()
        .get(bridge.url("/blog/anything"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_home_and_health() {
    let upstream = common::start_mock_upstream(|_| MockResponse::json(200, "{}")).await;
    let bridge = common::start_bridge(upstream.addr).await;
    let client = common::client();

    let home = client.get(bridge.url("/")).send().await.unwrap();
    assert_eq!(home.status(), StatusCode::OK);
    assert!(home.text().await.unwrap().contains("Bienvenido a Nannyfy"));

    let health: serde_json::Value = client
        .get(bridge.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, serde_json::json!({"status": "ok"}));

    assert!(upstream.requests().is_empty());
}
