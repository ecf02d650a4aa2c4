//! Integration tests for the magic link HTTP flow.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum_test::TestServer;
use eventmaker_auth::handlers::magic_link::{SendMagicLinkResponse, VerifyMagicLinkResponse};
use eventmaker_auth::mocks::{
    MockEmailProvider, MockSessionStore, MockTokenStore, MockUserRepository,
};
use eventmaker_auth::{AuthProviders, AuthSecret, AuthService, MagicLinkConfig, auth_router};
use eventmaker_core::environment::SystemClock;
use serde_json::{Value, json};
use std::sync::Arc;

struct TestApp {
    server: TestServer,
    email: MockEmailProvider,
}

fn test_app(config: MagicLinkConfig) -> TestApp {
    eventmaker_testing::helpers::init_tracing();

    let email = MockEmailProvider::new();
    let auth = Arc::new(AuthService::new(
        config,
        AuthSecret::new("integration-secret"),
        AuthProviders {
            email: Arc::new(email.clone()),
            tokens: Arc::new(MockTokenStore::new()),
            sessions: Arc::new(MockSessionStore::new()),
            users: Arc::new(MockUserRepository::new()),
        },
        Arc::new(SystemClock),
    ));

    let app: axum::Router = auth_router().with_state(auth);
    TestApp {
        server: TestServer::new(app).unwrap(),
        email,
    }
}

fn token_of(link: &str) -> String {
    link.split_once("token=").unwrap().1.to_string()
}

async fn sign_in(app: &TestApp, email: &str) -> VerifyMagicLinkResponse {
    app.server
        .post("/magic-link/send")
        .json(&json!({ "email": email }))
        .await
        .assert_status_ok();

    let link = app.email.last_link_for(email).expect("link was emailed");
    let response = app
        .server
        .get("/magic-link/verify")
        .add_query_param("token", token_of(&link))
        .await;
    response.assert_status_ok();
    response.json::<VerifyMagicLinkResponse>()
}

#[tokio::test]
async fn test_send_returns_confirmation() {
    let app = test_app(MagicLinkConfig::default());

    let response = app
        .server
        .post("/magic-link/send")
        .json(&json!({ "email": "Guest@Example.com" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<SendMagicLinkResponse>();
    assert_eq!(body.email, "guest@example.com");
    assert!(body.magic_link.is_none());
    assert_eq!(app.email.sent_count(), 1);
}

#[tokio::test]
async fn test_send_exposes_link_when_configured() {
    let app = test_app(MagicLinkConfig::new("http://events.test").with_exposed_links(true));

    let body = app
        .server
        .post("/magic-link/send")
        .json(&json!({ "email": "guest@example.com" }))
        .await
        .json::<SendMagicLinkResponse>();

    let link = body.magic_link.expect("link exposed");
    assert!(link.starts_with("http://events.test/api/auth/magic-link/verify?token="));
}

#[tokio::test]
async fn test_send_rejects_bad_email() {
    let app = test_app(MagicLinkConfig::default());

    let response = app
        .server
        .post("/magic-link/send")
        .json(&json!({ "email": "nope" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Invalid email address" })
    );
}

#[tokio::test]
async fn test_closed_registration_is_forbidden() {
    let app = test_app(MagicLinkConfig::default().with_new_users(false));

    let response = app
        .server
        .post("/magic-link/send")
        .json(&json!({ "email": "stranger@example.com" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_verify_sets_cookie_and_returns_session() {
    let app = test_app(MagicLinkConfig::default());
    app.server
        .post("/magic-link/send")
        .json(&json!({ "email": "guest@example.com" }))
        .await;
    let link = app.email.last_link_for("guest@example.com").unwrap();

    let response = app
        .server
        .get("/magic-link/verify")
        .add_query_param("token", token_of(&link))
        .await;

    response.assert_status_ok();
    let cookie = response.header(header::SET_COOKIE);
    assert!(cookie.to_str().unwrap().starts_with("session_token="));
    let body = response.json::<VerifyMagicLinkResponse>();
    assert_eq!(body.email, "guest@example.com");
    assert!(!body.session_token.is_empty());
}

#[tokio::test]
async fn test_link_cannot_be_reused() {
    let app = test_app(MagicLinkConfig::default());
    sign_in(&app, "guest@example.com").await;
    let link = app.email.last_link_for("guest@example.com").unwrap();

    let response = app
        .server
        .get("/magic-link/verify")
        .add_query_param("token", token_of(&link))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Invalid magic link token" })
    );
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = test_app(MagicLinkConfig::default());

    app.server
        .get("/magic-link/verify")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_requires_credentials() {
    let app = test_app(MagicLinkConfig::default());

    let response = app.server.get("/session").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({ "message": "Unauthorized" }));
}

#[tokio::test]
async fn test_session_with_bearer_token() {
    let app = test_app(MagicLinkConfig::default());
    let signed_in = sign_in(&app, "guest@example.com").await;

    let response = app
        .server
        .get("/session")
        .authorization_bearer(&signed_in.session_token)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["email"], "guest@example.com");
    assert_eq!(body["userId"], json!(signed_in.user_id));
    assert!(body.get("tokenHash").is_none());
}

#[tokio::test]
async fn test_session_with_cookie() {
    let app = test_app(MagicLinkConfig::default());
    let signed_in = sign_in(&app, "guest@example.com").await;

    let cookie = format!("session_token={}", signed_in.session_token);
    app.server
        .get("/session")
        .add_header(
            HeaderName::from_static("cookie"),
            HeaderValue::from_str(&cookie).unwrap(),
        )
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let app = test_app(MagicLinkConfig::default());
    let signed_in = sign_in(&app, "guest@example.com").await;

    app.server
        .post("/logout")
        .authorization_bearer(&signed_in.session_token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get("/session")
        .authorization_bearer(&signed_in.session_token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
