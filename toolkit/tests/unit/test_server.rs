//! Composer server tests

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use cicd_toolkit::app::options::ComposerOptions;
use cicd_toolkit::composer::client::Composer;
use cicd_toolkit::server::serve::router;
use cicd_toolkit::server::state::ServerState;
use serde_json::{json, Value};
use tokio_test::assert_ok;
use tower::ServiceExt;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(base_url_override: Option<String>) -> Router {
    let options = ComposerOptions {
        base_url_override: base_url_override.clone(),
        ..Default::default()
    };
    let composer = Arc::new(Composer::new(base_url_override).unwrap());
    router(Arc::new(ServerState::new(composer, options)))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = assert_ok!(app.clone().oneshot(request).await);
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_index_serves_form() {
    let app = app(None);
    let (status, body) = send(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form"));
    assert!(body.contains("/api/requests"));
}

#[tokio::test]
async fn test_settings_list_methods_and_default_port() {
    let app = app(Some("https://api.example.com".to_string()));
    let (status, body) = send(&app, get("/api/settings")).await;

    assert_eq!(status, StatusCode::OK);
    let settings: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(settings["default_port"], "8080");
    assert_eq!(settings["base_url_override"], "https://api.example.com");
    assert_eq!(settings["methods"], json!(["GET", "POST", "PUT", "DELETE"]));
}

#[tokio::test]
async fn test_blank_route_is_not_submitted() {
    let app = app(None);
    let (status, body) = send(
        &app,
        post_json("/api/requests", json!({ "method": "GET", "route": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let reply: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(reply["submitted"], false);
    assert_eq!(reply["response"], Value::Null);
}

#[tokio::test]
async fn test_submission_shows_backend_response() {
    let backend = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/items/7"))
        .and(body_string("{\"qty\":2}"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"updated\":true}"))
        .expect(1)
        .mount(&backend)
        .await;

    let app = app(Some(backend.uri()));
    let (status, body) = send(
        &app,
        post_json(
            "/api/requests",
            json!({ "method": "PUT", "route": "/items/7", "body": "{\"qty\":2}" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let reply: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(reply["submitted"], true);
    assert_eq!(reply["response"], "{\"updated\":true}");

    let (_, body) = send(&app, get("/api/response")).await;
    let snapshot: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(snapshot["response"], "{\"updated\":true}");
    assert_eq!(snapshot["is_error"], false);
}

#[tokio::test]
async fn test_unknown_method_is_rejected() {
    let app = app(None);
    let (status, _) = send(
        &app,
        post_json("/api/requests", json!({ "method": "PATCH", "route": "/x" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_health_reports_service_name() {
    let app = app(None);
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["service"], "cicd-composer");
}
