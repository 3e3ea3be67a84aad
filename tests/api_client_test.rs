//! API client wrapper integration tests
//!
//! Exercise the envelope contract against a mock backend: every call
//! resolves to the canonical envelope, expected failures never become
//! panics, and a 401 clears the stored token as a side effect.

mod helpers;

use assert_matches::assert_matches;
use serde_json::{json, Value};
use tokio::time::{timeout, Duration};

use varta_client::api::{ApiEnvelope, AuthEvent, ErrorCode, NETWORK_ERROR_MESSAGE};
use varta_client::config::Settings;
use varta_client::state::AppContext;

use helpers::test_context::TestContext;

#[tokio::test]
async fn backend_envelope_passes_through() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_json(
            "GET",
            "tickets/all/u1",
            json!({ "message": "Tickets fetched", "error": false, "data": [] }),
        )
        .await;

    let app = ctx.app().await;
    let envelope: ApiEnvelope<Value> = app.api.get("tickets/all/u1", &[]).await;

    assert!(envelope.is_success());
    assert_eq!(envelope.message, "Tickets fetched");
    assert!(envelope.data.unwrap().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn success_shape_is_normalized() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_json(
            "GET",
            "users/u7",
            json!({ "success": true, "data": { "id": "u7" } }),
        )
        .await;

    let app = ctx.app().await;
    let envelope: ApiEnvelope<Value> = app.api.get("users/u7", &[]).await;

    assert!(envelope.is_success());
    assert_eq!(envelope.data.unwrap()["id"], "u7");
}

#[tokio::test]
async fn http_error_becomes_failure_envelope() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_error("GET", "users/u1", 500, "Server exploded")
        .await;

    let app = ctx.app().await;
    let envelope: ApiEnvelope<Value> = app.api.get("users/u1", &[]).await;

    assert!(envelope.error);
    assert_eq!(envelope.status, Some(500));
    assert_eq!(envelope.message, "Server exploded");
    assert_eq!(envelope.code, Some(ErrorCode::HttpError));
    assert!(envelope.data.is_none());
}

#[tokio::test]
async fn network_failure_becomes_failure_envelope() {
    // Nothing listens here; the request never gets a response
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.api.base_url = "http://127.0.0.1:9/api/".to_string();
    settings.storage.dir = dir.path().to_string_lossy().to_string();

    let app = AppContext::initialize(settings).await.unwrap();
    let envelope: ApiEnvelope<Value> = app.api.get("public/news", &[]).await;

    assert!(envelope.error);
    assert_eq!(envelope.message, NETWORK_ERROR_MESSAGE);
    assert_eq!(envelope.code, Some(ErrorCode::NetworkError));
    assert_eq!(envelope.status, None);
}

#[tokio::test]
async fn bearer_token_is_attached_when_stored() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_json(
            "GET",
            "users/u1",
            json!({ "message": "ok", "error": false, "data": { "id": "u1" } }),
        )
        .await;

    let app = ctx.app().await;
    app.storage.save_token("secret-token").await.unwrap();

    let _: ApiEnvelope<Value> = app.api.get("users/u1", &[]).await;

    let requests = ctx.backend.server.received_requests().await.unwrap();
    let auth = requests[0].headers.get("authorization").unwrap();
    assert_eq!(auth.to_str().unwrap(), "Bearer secret-token");
}

#[tokio::test]
async fn missing_token_is_not_an_error() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_json(
            "GET",
            "public/news",
            json!({ "message": "ok", "error": false, "data": { "articles": [] } }),
        )
        .await;

    let app = ctx.app().await;
    let envelope: ApiEnvelope<Value> = app.api.get("public/news", &[]).await;
    assert!(envelope.is_success());

    let requests = ctx.backend.server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn unauthorized_clears_token_and_emits_event() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_error("GET", "admin/news", 401, "Token expired")
        .await;

    let app = ctx.app().await;
    app.storage.save_token("stale-token").await.unwrap();
    let mut events = app.api.subscribe_auth_events();

    let envelope: ApiEnvelope<Value> = app.api.get("admin/news", &[]).await;

    assert!(envelope.error);
    assert_eq!(envelope.status, Some(401));
    assert_eq!(envelope.code, Some(ErrorCode::Unauthorized));

    // The side effect ran before the envelope was returned
    assert_eq!(app.storage.load_token().await.unwrap(), None);

    let event = timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("event within deadline")
        .expect("channel open");
    assert_matches!(event, AuthEvent::Unauthorized);
}

#[tokio::test]
async fn requests_carry_a_request_id() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_json(
            "GET",
            "public/news",
            json!({ "message": "ok", "error": false, "data": null }),
        )
        .await;

    let app = ctx.app().await;
    let _: ApiEnvelope<Value> = app.api.get("public/news", &[]).await;

    let requests = ctx.backend.server.received_requests().await.unwrap();
    assert!(requests[0].headers.contains_key("x-request-id"));
}
