mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use carshare_gateway::config::Config;
use common::{app, get, send, send_json};
use serde_json::json;

#[tokio::test]
async fn placeholder_renders_requested_size() {
    let app = app(Config::default());

    let (status, headers, body) = send(&app, get("/api/placeholder/800/600", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/svg+xml");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");
    let svg = std::str::from_utf8(&body).expect("svg was not utf-8");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("800×600"));
    assert!(svg.contains(r#"width="800""#));
}

#[tokio::test]
async fn placeholder_falls_back_on_garbage() {
    let app = app(Config::default());

    for uri in ["/api/placeholder/abc/def", "/api/placeholder"] {
        let (status, _, body) = send(&app, get(uri, None)).await;
        assert_eq!(status, StatusCode::OK, "uri: {uri}");
        let svg = std::str::from_utf8(&body).expect("svg was not utf-8");
        assert!(svg.contains("400×300"), "uri: {uri}");
    }
}

#[tokio::test]
async fn placeholder_serves_default_for_trailing_slash_and_undecodable_path() {
    let app = app(Config::default());

    for uri in ["/api/placeholder/", "/api/placeholder/%FF/600"] {
        let (status, headers, body) = send(&app, get(uri, None)).await;
        assert_eq!(status, StatusCode::OK, "uri: {uri}");
        assert_eq!(headers[header::CONTENT_TYPE], "image/svg+xml", "uri: {uri}");
        let svg = std::str::from_utf8(&body).expect("svg was not utf-8");
        assert!(svg.contains("400×300"), "uri: {uri}");
    }
}

#[tokio::test]
async fn placeholder_rejects_post_with_405() {
    let app = app(Config::default());
    let req = Request::builder()
        .method("POST")
        .uri("/api/placeholder/800/600")
        .body(Body::empty())
        .expect("failed to build request");

    let (status, headers, _) = send(&app, req).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers[header::ALLOW], "GET");
}

#[tokio::test]
async fn health_reports_backend_mode() {
    let app = app(Config::default());

    let (status, body) = send_json(&app, get("/api/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "backend": "unconfigured"}));
}

#[tokio::test]
async fn oversized_json_body_returns_413() {
    let app = app(Config::default());

    let oversized_id = "a".repeat(128 * 1024);
    let payload = format!(r#"{{"userId":"{oversized_id}"}}"#);
    let req = Request::builder()
        .method("POST")
        .uri("/api/admin/delete-user")
        .header("content-type", "application/json")
        .body(Body::from(payload))
        .expect("failed to build request");

    let (status, body) = send_json(&app, req).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
}
