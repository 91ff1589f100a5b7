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
    let state = ApiState::builder().config(ApiConfig::default()).events(EventBus::new()).build().unwrap();
    let (router, _doc) = gems_vocabulary::api::router().with_state(state).split_for_parts();
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
async fn first_review_and_follow_up() {
    let app = app();
    let (status, state) = post(&app, "/vocabulary/review", json!({"itemId": "el gato", "correct": true})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["itemId"], "el gato");
    assert_eq!(state["level"], 1);
    assert_eq!(state["correct"], 1);
    assert!(state["nextReview"].is_string());

    let (status, state) = post(&app, "/vocabulary/review", json!({"state": state, "correct": false})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["level"], 0);
    assert_eq!(state["incorrect"], 1);
}

#[tokio::test]
async fn invalid_reviews_are_rejected() {
    let app = app();
    let (status, body) = post(&app, "/vocabulary/review", json!({"correct": true})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, _) =
        post(&app, "/vocabulary/review", json!({"state": {"itemId": "x", "level": 9}, "correct": true})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn due_list_with_limit() {
    let app = app();
    let (status, body) = post(
        &app,
        "/vocabulary/due",
        json!({
            "now": "2025-03-10T12:00:00Z",
            "limit": 1,
            "states": [
                {"itemId": "later", "nextReview": "2025-03-12T12:00:00Z"},
                {"itemId": "overdue", "nextReview": "2025-03-01T12:00:00Z"},
                {"itemId": "soon", "nextReview": "2025-03-09T12:00:00Z"}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["due"].as_array().unwrap().len(), 1);
    assert_eq!(body["due"][0]["itemId"], "overdue");
    assert_eq!(body["summary"]["due"], 2);
    assert_eq!(body["summary"]["total"], 3);
}

#[tokio::test]
async fn huge_counters_from_the_client_are_accepted() {
    let app = app();
    let (status, state) = post(
        &app,
        "/vocabulary/review",
        json!({"state": {"itemId": "agua", "correct": u32::MAX}, "correct": true}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["correct"], u32::MAX);
    assert_eq!(state["level"], 1);
}
