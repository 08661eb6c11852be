//! Integration tests for the dialogue endpoints.
//!
//! Drives the full router (auth middleware, handlers, in-memory storage)
//! with a scripted model provider.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use lingua_practice::adapters::ai::{MockAIProvider, MockError};
use lingua_practice::adapters::auth::{MockIdentityProvider, MockSessionValidator};
use lingua_practice::adapters::http::{build_router, AppState, RouterOptions};
use lingua_practice::adapters::memory::{InMemoryDialogueRepository, InMemoryStatsRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

const LEARNER_TOKEN: &str = "learner-token";
const OTHER_TOKEN: &str = "other-token";

fn six_line_reply() -> String {
    let lines: Vec<Value> = (0..6)
        .map(|i| {
            json!({
                "speaker": if i % 2 == 0 { "A" } else { "B" },
                "text": format!("Phrase numéro {}", i + 1),
                "translation": format!("Phrase number {}", i + 1),
            })
        })
        .collect();
    format!(
        "Voici votre dialogue :\n```json\n{}\n```\nBonne pratique !",
        json!({ "lines": lines })
    )
}

fn app_with(provider: MockAIProvider) -> Router {
    let validator = MockSessionValidator::new()
        .with_test_user(LEARNER_TOKEN, "learner")
        .with_test_user(OTHER_TOKEN, "other");

    let state = AppState::new(
        Arc::new(provider),
        Arc::new(InMemoryDialogueRepository::new()),
        Arc::new(InMemoryStatsRepository::new()),
        Arc::new(validator),
        Arc::new(MockIdentityProvider::new()),
    );
    build_router(state, RouterOptions::default())
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

fn prompt_body() -> Value {
    json!({
        "topic": "ordering at a café",
        "language": "French",
        "difficulty": "Beginner",
        "tone": "Casual"
    })
}

// =============================================================================
// Generation
// =============================================================================

#[tokio::test]
async fn anonymous_generation_returns_unsaved_dialogue() {
    let app = app_with(MockAIProvider::new().with_response(six_line_reply()));

    let (status, body) = send(
        &app,
        request(Method::POST, "/api/dialogues", None, Some(prompt_body())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lines"].as_array().unwrap().len(), 6);
    assert_eq!(body["lines"][0]["speaker"], "A");
    assert_eq!(
        body["prompt"],
        json!({
            "topic": "ordering at a café",
            "language": "French",
            "difficulty": "Beginner",
            "tone": "Casual",
            "participants": 2
        })
    );
    assert_eq!(body["locale"], "fr-FR");
    assert_eq!(body["isFavorite"], false);
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn signed_in_generation_is_saved() {
    let app = app_with(MockAIProvider::new().with_fixed_response(six_line_reply()));

    let (status, created) = send(
        &app,
        request(
            Method::POST,
            "/api/dialogues",
            Some(LEARNER_TOKEN),
            Some(prompt_body()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["userId"], "learner");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/dialogues/{}", id),
            Some(LEARNER_TOKEN),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["lines"], created["lines"]);
}

#[tokio::test]
async fn invalid_prompt_is_400_without_model_call() {
    let provider = MockAIProvider::new().with_fixed_response(six_line_reply());
    let app = app_with(provider.clone());

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/dialogues",
            None,
            Some(json!({ "topic": "", "language": "French", "difficulty": "Beginner", "tone": "Casual" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PROMPT");
    assert_eq!(body["details"]["field"], "topic");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn unsupported_language_is_400() {
    let app = app_with(MockAIProvider::new().with_fixed_response(six_line_reply()));

    let mut body = prompt_body();
    body["language"] = json!("Klingon");
    let (status, body) = send(&app, request(Method::POST, "/api/dialogues", None, Some(body))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "language");
}

#[tokio::test]
async fn oversized_participants_is_invalid_prompt() {
    let provider = MockAIProvider::new().with_fixed_response(six_line_reply());
    let app = app_with(provider.clone());

    let mut body = prompt_body();
    body["participants"] = json!(300);
    let (status, body) = send(&app, request(Method::POST, "/api/dialogues", None, Some(body))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PROMPT");
    assert_eq!(body["details"]["field"], "participants");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn wrongly_typed_field_is_invalid_prompt() {
    let provider = MockAIProvider::new().with_fixed_response(six_line_reply());
    let app = app_with(provider.clone());

    let mut body = prompt_body();
    body["topic"] = json!(42);
    let (status, body) = send(&app, request(Method::POST, "/api/dialogues", None, Some(body))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PROMPT");
    assert!(body["message"].as_str().unwrap().contains("topic"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn echoed_prompt_can_be_resubmitted() {
    let app = app_with(MockAIProvider::new().with_fixed_response(six_line_reply()));

    let mut body = prompt_body();
    body["participants"] = json!(3);
    let (_, first) = send(&app, request(Method::POST, "/api/dialogues", None, Some(body))).await;
    let (status, second) = send(
        &app,
        request(Method::POST, "/api/dialogues", None, Some(first["prompt"].clone())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["prompt"], first["prompt"]);
    assert_eq!(second["prompt"]["participants"], 3);
}

#[tokio::test]
async fn prose_reply_is_generation_failure() {
    let app = app_with(
        MockAIProvider::new().with_response("Sorry, I can't write a dialogue about that."),
    );

    let (status, body) = send(
        &app,
        request(Method::POST, "/api/dialogues", None, Some(prompt_body())),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "GENERATION_FAILED");
}

#[tokio::test]
async fn model_outage_is_generation_failure() {
    let app = app_with(MockAIProvider::new().with_error(MockError::Unavailable {
        message: "overloaded".to_string(),
    }));

    let (status, body) = send(
        &app,
        request(Method::POST, "/api/dialogues", None, Some(prompt_body())),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "GENERATION_FAILED");
}

// =============================================================================
// Saved dialogues
// =============================================================================

#[tokio::test]
async fn favorites_flow() {
    let app = app_with(MockAIProvider::new().with_fixed_response(six_line_reply()));

    let (_, first) = send(
        &app,
        request(Method::POST, "/api/dialogues", Some(LEARNER_TOKEN), Some(prompt_body())),
    )
    .await;
    let (_, _second) = send(
        &app,
        request(Method::POST, "/api/dialogues", Some(LEARNER_TOKEN), Some(prompt_body())),
    )
    .await;
    let id = first["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/dialogues/{}/favorite", id),
            Some(LEARNER_TOKEN),
            Some(json!({ "isFavorite": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["isFavorite"], true);

    let (status, favorites) = send(
        &app,
        request(Method::GET, "/api/dialogues/favorites", Some(LEARNER_TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(favorites["count"], 1);
    assert_eq!(favorites["dialogues"][0]["id"], id);

    let (status, recent) = send(
        &app,
        request(Method::GET, "/api/dialogues?limit=10", Some(LEARNER_TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recent["count"], 2);
}

#[tokio::test]
async fn other_users_dialogue_is_not_found() {
    let app = app_with(MockAIProvider::new().with_fixed_response(six_line_reply()));

    let (_, created) = send(
        &app,
        request(Method::POST, "/api/dialogues", Some(LEARNER_TOKEN), Some(prompt_body())),
    )
    .await;
    let uri = format!("/api/dialogues/{}", created["id"].as_str().unwrap());

    let (status, _) = send(&app, request(Method::GET, &uri, Some(OTHER_TOKEN), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            &format!("{}/favorite", uri),
            Some(OTHER_TOKEN),
            Some(json!({ "isFavorite": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn saved_dialogue_routes_require_auth() {
    let app = app_with(MockAIProvider::new());

    let (status, body) = send(&app, request(Method::GET, "/api/dialogues", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/dialogues/favorites", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_id_is_400() {
    let app = app_with(MockAIProvider::new());

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/dialogues/not-a-uuid", Some(LEARNER_TOKEN), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
