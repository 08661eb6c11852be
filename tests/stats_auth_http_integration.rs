//! Integration tests for practice statistics and account endpoints.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use lingua_practice::adapters::ai::MockAIProvider;
use lingua_practice::adapters::auth::{MockIdentityProvider, MockSessionValidator};
use lingua_practice::adapters::http::{build_router, AppState, RouterOptions};
use lingua_practice::adapters::memory::{InMemoryDialogueRepository, InMemoryStatsRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

const TOKEN: &str = "learner-token";

fn app_with(identity: MockIdentityProvider) -> Router {
    let state = AppState::new(
        Arc::new(MockAIProvider::new()),
        Arc::new(InMemoryDialogueRepository::new()),
        Arc::new(InMemoryStatsRepository::new()),
        Arc::new(MockSessionValidator::new().with_test_user(TOKEN, "learner")),
        Arc::new(identity),
    );
    build_router(state, RouterOptions::default())
}

fn app() -> Router {
    app_with(MockIdentityProvider::new())
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// =============================================================================
// Stats
// =============================================================================

#[tokio::test]
async fn new_user_has_empty_stats() {
    let (status, body) = send(&app(), request(Method::GET, "/api/stats", Some(TOKEN), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], "learner");
    assert_eq!(body["dialoguesCompleted"], 0);
    assert_eq!(body["totalPracticeTime"], 0);
    assert_eq!(body["languageCount"], 0);
}

#[tokio::test]
async fn practice_accumulates() {
    let app = app();

    for (secs, language) in [(120, "Spanish"), (60, "spanish"), (30, "German")] {
        let (status, _) = send(
            &app,
            request(
                Method::POST,
                "/api/stats",
                Some(TOKEN),
                Some(json!({ "practiceTime": secs, "language": language, "mode": "roleplay" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = send(
        &app,
        request(Method::POST, "/api/stats/dialogue-completed", Some(TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, request(Method::GET, "/api/stats", Some(TOKEN), None)).await;
    assert_eq!(body["totalPracticeTime"], 210);
    assert_eq!(body["languagesPracticed"]["Spanish"], 2);
    assert_eq!(body["languagesPracticed"]["German"], 1);
    assert_eq!(body["languageCount"], 2);
    assert_eq!(body["dialoguesCompleted"], 1);
}

#[tokio::test]
async fn negative_practice_time_is_rejected() {
    let (status, body) = send(
        &app(),
        request(
            Method::POST,
            "/api/stats",
            Some(TOKEN),
            Some(json!({ "practiceTime": -5 })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn non_numeric_practice_time_is_rejected() {
    let (status, body) = send(
        &app(),
        request(
            Method::POST,
            "/api/stats",
            Some(TOKEN),
            Some(json!({ "practiceTime": "ten minutes" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["message"].as_str().unwrap().contains("practiceTime"));
}

#[tokio::test]
async fn stats_require_auth() {
    let (status, _) = send(&app(), request(Method::GET, "/api/stats", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn sign_up_then_sign_in() {
    let app = app();
    let credentials = json!({ "email": "new@example.com", "password": "secret1" });

    let (status, body) = send(
        &app,
        request(Method::POST, "/api/auth/sign-up", None, Some(credentials.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "signed_in");
    assert!(body["session"]["accessToken"].is_string());

    let (status, body) = send(
        &app,
        request(Method::POST, "/api/auth/sign-in", None, Some(credentials)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "new@example.com");
}

#[tokio::test]
async fn sign_up_pending_confirmation() {
    let app = app_with(MockIdentityProvider::new().requiring_confirmation());

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/sign-up",
            None,
            Some(json!({ "email": "new@example.com", "password": "secret1" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "confirmation_required");
    assert_eq!(body["email"], "new@example.com");
}

#[tokio::test]
async fn sign_in_without_password_is_400() {
    let (status, body) = send(
        &app(),
        request(
            Method::POST,
            "/api/auth/sign-in",
            None,
            Some(json!({ "email": "a@example.com" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn wrong_password_is_401() {
    let app = app_with(MockIdentityProvider::new().with_account("a@example.com", "secret1"));

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/sign-in",
            None,
            Some(json!({ "email": "a@example.com", "password": "nope-nope" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn duplicate_sign_up_is_409() {
    let app = app_with(MockIdentityProvider::new().with_account("a@example.com", "secret1"));

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/sign-up",
            None,
            Some(json!({ "email": "a@example.com", "password": "secret2" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn session_reports_current_user() {
    let app = app();

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/auth/session", Some(TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "learner");

    let (status, _) = send(&app, request(Method::GET, "/api/auth/session", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/auth/session", Some("expired"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
