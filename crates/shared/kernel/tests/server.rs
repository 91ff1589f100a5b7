#![cfg(feature = "server")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use gems_kernel::domain::config::ApiConfig;
use gems_kernel::server::router::system_router;
use gems_kernel::server::{ApiError, ApiState, ApiStateError};
use tower::ServiceExt;

#[derive(Debug)]
struct Demo;

impl gems_kernel::domain::registry::FeatureSlice for Demo {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

fn state() -> ApiState {
    ApiState::builder()
        .config(ApiConfig::default())
        .register_slice(gems_kernel::domain::registry::InitializedSlice::new(Demo))
        .build()
        .expect("state")
}

#[test]
fn builder_requires_config() {
    let err = ApiState::builder().build().expect_err("config is mandatory");
    assert!(matches!(err, ApiStateError::Validation { .. }));
}

#[test]
fn registered_slices_are_retrievable() {
    let state = state();
    assert!(state.get_slice::<Demo>().is_some());
    assert_eq!(state.slice_names().len(), 1);
}

#[tokio::test]
async fn api_errors_map_to_status_and_json() {
    let response = ApiError::not_found("hangman game abc").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Not found: hangman game abc");

    assert_eq!(ApiError::gone("expired").status(), StatusCode::GONE);
    assert_eq!(ApiError::from("boom").status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_slices() {
    let (router, _doc) = system_router().with_state(state()).split_for_parts();
    let app: Router = router;

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body["status"], "up");
    assert_eq!(body["slices"][0], "Demo");
}
