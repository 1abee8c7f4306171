//! CORS and request limit integration tests

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};

use lagentry_app::MAX_BODY_BYTES;
use lagentry_common::Config;

use crate::common::TestApp;

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/newsletter")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_preflight_from_site_origin() {
    let app = TestApp::new();

    let response = app.send(preflight("https://www.lagentry.com")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://www.lagentry.com"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("DELETE"));
}

#[tokio::test]
async fn test_unknown_origin_gets_no_allow_origin() {
    let app = TestApp::new();

    let response = app.send(preflight("https://evil.example")).await;

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_frontend_url_is_allowed() {
    let app = TestApp::with_config(Config {
        frontend_url: Some("https://preview.lagentry.dev".to_string()),
        ..Config::default()
    });

    let response = app.send(preflight("https://preview.lagentry.dev")).await;

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://preview.lagentry.dev"
    );
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = TestApp::new();
    let oversized = format!(r#"{{"email":"{}"}}"#, "a".repeat(MAX_BODY_BYTES));
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/newsletter")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(oversized))
        .unwrap();

    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}
