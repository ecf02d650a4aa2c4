//! HTTP tests for the event API over in-memory storage and auth mocks.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use axum::http::StatusCode;
use axum_test::TestServer;
use eventmaker_auth::handlers::magic_link::VerifyMagicLinkResponse;
use eventmaker_auth::mocks::{
    MockEmailProvider, MockSessionStore, MockTokenStore, MockUserRepository,
};
use eventmaker_auth::{AuthProviders, AuthSecret, AuthService, MagicLinkConfig};
use eventmaker_core::environment::SystemClock;
use eventmaker_core::{EventService, UserSummary};
use eventmaker_server::{AppState, ReadinessChecker, build_router};
use eventmaker_testing::InMemoryEventRepository;
use serde_json::{Value, json};
use std::sync::Arc;

const CODE_ALPHABET: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

struct TestApp {
    server: TestServer,
    email: MockEmailProvider,
    repo: Arc<InMemoryEventRepository>,
}

fn test_app() -> TestApp {
    eventmaker_testing::init_tracing();

    let repo = Arc::new(InMemoryEventRepository::new());
    let email = MockEmailProvider::new();
    let auth = Arc::new(AuthService::new(
        MagicLinkConfig::default(),
        AuthSecret::new("http-api-secret"),
        AuthProviders {
            email: Arc::new(email.clone()),
            tokens: Arc::new(MockTokenStore::new()),
            sessions: Arc::new(MockSessionStore::new()),
            users: Arc::new(MockUserRepository::new()),
        },
        Arc::new(SystemClock),
    ));
    let events = Arc::new(EventService::new(repo.clone(), Arc::new(SystemClock)));
    let readiness = Arc::new(ReadinessChecker::new(repo.clone(), true));

    let app: axum::Router = build_router(AppState::new(events, auth, readiness));
    TestApp {
        server: TestServer::new(app).unwrap(),
        email,
        repo,
    }
}

/// Sign in through the magic link endpoints and return the session token.
async fn sign_in(app: &TestApp, email: &str) -> String {
    app.server
        .post("/api/auth/magic-link/send")
        .json(&json!({ "email": email }))
        .await
        .assert_status_ok();

    let link = app.email.last_link_for(email).expect("link was emailed");
    let token = link.split_once("token=").unwrap().1.to_string();
    let response = app
        .server
        .get("/api/auth/magic-link/verify")
        .add_query_param("token", token)
        .await;
    response.assert_status_ok();
    let verified = response.json::<VerifyMagicLinkResponse>();

    app.repo.insert_user(UserSummary {
        id: verified.user_id,
        email: verified.email,
        name: None,
    });
    verified.session_token
}

async fn create_event(app: &TestApp, token: &str, body: Value) -> Value {
    let response = app
        .server
        .post("/api/events")
        .authorization_bearer(token)
        .json(&body)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_create_event_returns_code() {
    let app = test_app();
    let token = sign_in(&app, "host@example.com").await;

    let event = create_event(
        &app,
        &token,
        json!({ "title": "Launch", "startDate": "2030-01-01T12:00:00" }),
    )
    .await;

    assert_eq!(event["title"], "Launch");
    assert!(event["capacity"].is_null());
    let code = event["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| CODE_ALPHABET.contains(c)));
    assert_eq!(app.repo.event_count(), 1);
}

#[tokio::test]
async fn test_create_event_requires_session() {
    let app = test_app();

    let response = app
        .server
        .post("/api/events")
        .json(&json!({ "title": "Launch", "startDate": "2030-01-01T12:00:00" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({ "message": "Unauthorized" }));
}

#[tokio::test]
async fn test_create_event_reports_field_errors() {
    let app = test_app();
    let token = sign_in(&app, "host@example.com").await;

    let response = app
        .server
        .post("/api/events")
        .authorization_bearer(&token)
        .json(&json!({ "title": "", "startDate": "not a date" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Invalid event data");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"startDate"));
    assert_eq!(app.repo.event_count(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_invalid_event_data() {
    let app = test_app();
    let token = sign_in(&app, "host@example.com").await;

    let response = app
        .server
        .post("/api/events")
        .authorization_bearer(&token)
        .text("{ not json")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Invalid event data");
}

#[tokio::test]
async fn test_unknown_code_is_not_found() {
    let app = test_app();

    let response = app.server.get("/api/events/code/UNKNOWN").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Event not found" })
    );
}

#[tokio::test]
async fn test_lookup_by_code_counts_attendees() {
    let app = test_app();
    let host = sign_in(&app, "host@example.com").await;
    let guest = sign_in(&app, "guest@example.com").await;
    let event = create_event(
        &app,
        &host,
        json!({ "title": "Launch", "startDate": "2030-01-01T12:00:00", "location": "Pier 9" }),
    )
    .await;
    let id = event["id"].as_str().unwrap();

    app.server
        .post(&format!("/api/events/{id}/join"))
        .authorization_bearer(&guest)
        .await
        .assert_status(StatusCode::CREATED);

    let code = event["code"].as_str().unwrap();
    let response = app.server.get(&format!("/api/events/code/{code}")).await;

    response.assert_status_ok();
    let details = response.json::<Value>();
    assert_eq!(details["title"], "Launch");
    assert_eq!(details["location"], "Pier 9");
    assert_eq!(details["creator"]["email"], "host@example.com");
    assert_eq!(details["_count"]["attendances"], 1);
}

#[tokio::test]
async fn test_join_full_event_is_rejected() {
    let app = test_app();
    let host = sign_in(&app, "host@example.com").await;
    let first = sign_in(&app, "first@example.com").await;
    let second = sign_in(&app, "second@example.com").await;
    let event = create_event(
        &app,
        &host,
        json!({ "title": "Dinner", "startDate": "2030-01-01T19:00:00", "capacity": 1 }),
    )
    .await;
    let id = event["id"].as_str().unwrap();

    let joined = app
        .server
        .post(&format!("/api/events/{id}/join"))
        .authorization_bearer(&first)
        .await;
    joined.assert_status(StatusCode::CREATED);
    assert_eq!(joined.json::<Value>()["status"], "confirmed");

    let response = app
        .server
        .post(&format!("/api/events/{id}/join"))
        .authorization_bearer(&second)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "This event is at capacity" })
    );
}

#[tokio::test]
async fn test_second_join_is_rejected() {
    let app = test_app();
    let host = sign_in(&app, "host@example.com").await;
    let guest = sign_in(&app, "guest@example.com").await;
    let event = create_event(
        &app,
        &host,
        json!({ "title": "Launch", "startDate": "2030-01-01T12:00:00" }),
    )
    .await;
    let path = format!("/api/events/{}/join", event["id"].as_str().unwrap());

    app.server
        .post(&path)
        .authorization_bearer(&guest)
        .await
        .assert_status(StatusCode::CREATED);
    let response = app.server.post(&path).authorization_bearer(&guest).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "You are already attending this event" })
    );
}

#[tokio::test]
async fn test_join_malformed_id_is_not_found() {
    let app = test_app();
    let guest = sign_in(&app, "guest@example.com").await;

    let response = app
        .server
        .post("/api/events/not-a-uuid/join")
        .authorization_bearer(&guest)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Event not found" })
    );
}

#[tokio::test]
async fn test_attendance_lookup() {
    let app = test_app();
    let host = sign_in(&app, "host@example.com").await;
    let guest = sign_in(&app, "guest@example.com").await;
    let event = create_event(
        &app,
        &host,
        json!({ "title": "Launch", "startDate": "2030-01-01T12:00:00" }),
    )
    .await;
    let id = event["id"].as_str().unwrap();

    let missing = app
        .server
        .get(&format!("/api/events/{id}/attendance"))
        .authorization_bearer(&guest)
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        missing.json::<Value>(),
        json!({ "message": "Attendance not found" })
    );

    app.server
        .post(&format!("/api/events/{id}/join"))
        .authorization_bearer(&guest)
        .await
        .assert_status(StatusCode::CREATED);

    let found = app
        .server
        .get(&format!("/api/events/{id}/attendance"))
        .authorization_bearer(&guest)
        .await;
    found.assert_status_ok();
    assert_eq!(found.json::<Value>()["eventId"], id);
}

#[tokio::test]
async fn test_system_init_reports_checks() {
    let app = test_app();
    sign_in(&app, "host@example.com").await;

    let response = app.server.get("/api/system/init").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["ready"], true);
    assert_eq!(body["checks"]["database"], true);
    assert_eq!(body["checks"]["environment"], true);
    assert_eq!(body["checks"]["users"], 1);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_system_init_with_store_down() {
    let app = test_app();
    app.repo.set_unavailable(true);

    let body = app.server.get("/api/system/init").await.json::<Value>();

    assert_eq!(body["ready"], false);
    assert_eq!(body["checks"]["database"], false);
    assert!(body["checks"]["users"].is_null());
}

#[tokio::test]
async fn test_health() {
    let app = test_app();

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_correlation_id_is_echoed() {
    let app = test_app();

    let response = app.server.get("/health").await;

    assert!(!response.header("x-correlation-id").is_empty());
}
