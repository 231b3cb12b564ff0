//! Tests for `AppError` -> HTTP response mapping and for storage failures
//! surfacing through the handlers.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{body_json, delete_json, get, post_json, put_json, FailingStore, FAILURE_MESSAGE};
use movies_api::error::AppError;
use movies_core::error::CoreError;
use movies_db::StoreError;
use serde_json::json;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    (status, body_json(response).await)
}

// ---------------------------------------------------------------------------
// Direct mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("Invalid request payload".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Invalid request payload"}));
}

#[tokio::test]
async fn store_not_found_returns_404() {
    let err = AppError::Store(StoreError::Core(CoreError::NotFound {
        entity: "Movie",
        id: "5a1b2c3d4e5f60718293a4b5".into(),
    }));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"error": "Movie with id 5a1b2c3d4e5f60718293a4b5 not found"}));
}

#[tokio::test]
async fn store_backend_error_returns_500_with_message() {
    let err = AppError::Store(StoreError::Backend("socket closed".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"error": "socket closed"}));
}

// ---------------------------------------------------------------------------
// Storage failures are scoped to the request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_with_store_down_returns_500() {
    let app = common::build_test_app(Arc::new(FailingStore));
    let response = get(app, "/movies").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({"error": FAILURE_MESSAGE}));
}

#[tokio::test]
async fn get_by_id_with_store_down_returns_500() {
    let app = common::build_test_app(Arc::new(FailingStore));
    let response = get(app, "/movies/5a1b2c3d4e5f60718293a4b5").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn writes_with_store_down_return_500() {
    let id = "5a1b2c3d4e5f60718293a4b5";

    let response = post_json(
        common::build_test_app(Arc::new(FailingStore)),
        "/movies",
        json!({"title": "Heat", "year": 1995}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({"error": FAILURE_MESSAGE}));

    let response = put_json(
        common::build_test_app(Arc::new(FailingStore)),
        "/movies",
        json!({"id": id, "title": "Heat", "year": 1995}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = delete_json(
        common::build_test_app(Arc::new(FailingStore)),
        "/movies",
        json!({"id": id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn server_keeps_serving_after_a_store_failure() {
    let app = common::build_test_app(Arc::new(FailingStore));

    for _ in 0..3 {
        let response = get(app.clone(), "/movies").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
