mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use mathgen_backend::domain::Difficulty;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn health_returns_ok() {
    let (app, _state) = common::create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value, json!({ "ok": true }));
}

#[tokio::test]
async fn invalid_difficulty_is_rejected_with_400() {
    let (app, state) = common::create_test_app();

    for bad in [json!("extreme"), json!(""), json!("EASY"), Value::Null] {
        let (status, body) =
            post_json(&app, "/api/v1/problem", json!({ "difficulty": bad })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "difficulty: {bad:?}");
        assert_eq!(body["error"], "Invalid difficulty level");
        assert_eq!(body["code"], "invalid_difficulty");
    }

    // No session row was created for any rejected request.
    assert_eq!(state.store.session_count().await, 0);
}

#[tokio::test]
async fn generation_without_provider_is_a_generic_500() {
    let (app, state) = common::create_test_app();

    // Valid difficulty passes validation, then the provider call fails.
    let (status, body) =
        post_json(&app, "/api/v1/problem", json!({ "difficulty": "easy" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["code"], "provider_failure");

    // Absent difficulty defaults to medium and reaches the provider too.
    let (status, body) = post_json(&app, "/api/v1/problem", json!({})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "provider_failure");

    assert_eq!(state.store.session_count().await, 0);
}

#[tokio::test]
async fn unknown_session_submission_creates_no_row() {
    let (app, state) = common::create_test_app();

    let (status, body) = post_json(
        &app,
        "/api/v1/answer",
        json!({ "sessionId": "no-such-session", "userAnswer": 4.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["code"], "session_not_found");
    assert_eq!(state.store.submission_count().await, 0);
}

#[tokio::test]
async fn provider_failure_on_submit_writes_no_submission() {
    let (app, state) = common::create_test_app();

    let session_id = state
        .store
        .create_session("3 + 4 = ?".into(), 7.0, Difficulty::Easy)
        .await
        .unwrap();

    // The session resolves and the answer is graded, but feedback needs
    // the provider; the whole request fails and nothing is recorded.
    let (status, body) = post_json(
        &app,
        "/api/v1/answer",
        json!({ "sessionId": session_id, "userAnswer": 7.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "provider_failure");
    assert_eq!(state.store.session_count().await, 1);
    assert_eq!(state.store.submission_count().await, 0);
}
