//! Session and auth flow integration tests
//!
//! Login/logout through the auth service, hydration on startup, and the
//! invariant that authentication state and persisted storage move
//! together.

mod helpers;

use serde_json::json;

use varta_client::models::Role;
use varta_client::state::USER_KEY;

use helpers::test_context::TestContext;
use helpers::test_data;

#[tokio::test]
async fn login_flips_state_and_persists_user() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_login("fresh-token", test_data::user_json("1", "admin"))
        .await;

    let app = ctx.app().await;
    assert!(!app.session.is_authenticated().await);

    let envelope = app
        .services
        .auth_service
        .login("admin@varta.news", "hunter22")
        .await;

    assert!(envelope.is_success());
    assert!(app.session.is_authenticated().await);

    let user = app.session.user().await.unwrap();
    assert_eq!(user.id, "1");
    assert_eq!(user.role, Role::Admin);

    // The persisted record carries the same id, the token key the token
    let raw = tokio::fs::read_to_string(ctx.temp_dir.path().join(USER_KEY))
        .await
        .unwrap();
    assert!(raw.contains(r#""id":"1""#));
    assert_eq!(
        app.storage.load_token().await.unwrap(),
        Some("fresh-token".to_string())
    );
}

#[tokio::test]
async fn logout_clears_state_and_storage() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_login("tok", test_data::user_json("1", "admin"))
        .await;

    let app = ctx.app().await;
    app.services
        .auth_service
        .login("admin@varta.news", "hunter22")
        .await;
    assert!(app.session.is_authenticated().await);

    let envelope = app.services.auth_service.logout().await;
    assert!(envelope.is_success());

    assert!(!app.session.is_authenticated().await);
    assert!(app.session.user().await.is_none());
    assert!(app.storage.load_user().await.unwrap().is_none());
    assert!(app.storage.load_token().await.unwrap().is_none());
}

#[tokio::test]
async fn invalid_credentials_never_reach_the_network() {
    let ctx = TestContext::new().await;
    let app = ctx.app().await;

    let envelope = app.services.auth_service.login("not-an-email", "pw").await;
    assert!(envelope.error);

    let envelope = app.services.auth_service.login("a@b.com", "").await;
    assert!(envelope.error);

    assert_eq!(ctx.backend.request_count("auth/login").await, 0);
}

#[tokio::test]
async fn failed_login_leaves_session_untouched() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_error("POST", "auth/login", 403, "Wrong password")
        .await;

    let app = ctx.app().await;
    let envelope = app
        .services
        .auth_service
        .login("admin@varta.news", "wrong")
        .await;

    assert!(envelope.error);
    assert_eq!(envelope.message, "Wrong password");
    assert!(!app.session.is_authenticated().await);
    assert!(app.storage.load_user().await.unwrap().is_none());
}

#[tokio::test]
async fn session_is_hydrated_before_the_context_is_handed_out() {
    let ctx = TestContext::new().await;

    // A previous run left a persisted session behind
    {
        let app = ctx.app().await;
        ctx.backend
            .mock_login("tok", test_data::user_json("9", "reporter"))
            .await;
        app.services
            .auth_service
            .login("reporter@varta.news", "pw")
            .await;
    }

    // A fresh context over the same storage starts hydrated
    let app = ctx.app().await;
    let snapshot = app.session.snapshot().await;
    assert!(!snapshot.loading);
    assert!(snapshot.is_authenticated);
    assert_eq!(snapshot.user.unwrap().id, "9");
}

#[tokio::test]
async fn profile_update_merges_into_session() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_login("tok", test_data::user_json("3", "reporter"))
        .await;
    ctx.backend
        .mock_json(
            "PUT",
            "users/3/profile",
            json!({ "message": "Profile updated", "error": false, "data": { "id": "3" } }),
        )
        .await;

    let app = ctx.app().await;
    app.services
        .auth_service
        .login("reporter@varta.news", "pw")
        .await;

    let envelope = app
        .services
        .auth_service
        .update_profile(
            "3",
            &varta_client::models::UpdateProfileRequest {
                name: Some("New Byline".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(envelope.is_success());

    assert_eq!(
        app.session.user().await.unwrap().name.as_deref(),
        Some("New Byline")
    );
}
