#![cfg(feature = "server")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use gems_domain::config::ApiConfig;
use gems_event_bus::EventBus;
use gems_kernel::server::ApiState;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let config = ApiConfig::default();
    let state = ApiState::builder()
        .config(config.clone())
        .events(EventBus::new())
        .register_slice(gems_comprehension::init(&config).unwrap())
        .build()
        .unwrap();
    let (router, _doc) = gems_comprehension::api::router().with_state(state).split_for_parts();
    router
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn checks_one_answer() {
    let app = app();
    let (status, body) =
        post(&app, "/comprehension/check", json!({"correctAnswer": "Está aquí", "answer": "esta aqui"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isCorrect"], true);
    assert_eq!(body["pointsAwarded"], 1);

    let (_, body) = post(
        &app,
        "/comprehension/check",
        json!({"correctAnswer": ["swimming", "tennis", "running"], "answer": ["tennis"], "points": 3}),
    )
    .await;
    assert_eq!(body["isCorrect"], true);
    assert_eq!(body["pointsAwarded"], 3);
}

#[tokio::test]
async fn grades_a_task() {
    let app = app();
    let task = json!({
        "id": "fr-1",
        "passingScore": 50,
        "questions": [
            {"id": "q1", "type": "gap-fill", "correctAnswer": "boulangerie"},
            {"id": "q2", "type": "true-false", "correctAnswer": "true"}
        ]
    });
    let (status, body) = post(
        &app,
        "/comprehension/grade",
        json!({"task": task, "answers": {"q1": "boulangeri"}, "timeSpentSeconds": 95}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 50);
    assert_eq!(body["passed"], true);
    assert_eq!(body["timeSpentSeconds"], 95);
    assert_eq!(body["feedback"][1]["userAnswer"], Value::Null);

    let (status, body) =
        post(&app, "/comprehension/grade", json!({"task": {"id": "empty", "questions": []}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}
