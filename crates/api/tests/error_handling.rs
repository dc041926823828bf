//! Integration tests for error response shapes, including store
//! failures, which are simulated with a store that always errors.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, body_string, get, post_json};
use tower::ServiceExt;

use bookshelf_core::types::DbId;
use bookshelf_db::models::book::{Book, BookPatch, NewBook};
use bookshelf_db::{BookStore, StoreError};

/// Store whose every operation fails, for exercising the 500 path.
struct FailingStore;

impl FailingStore {
    fn error() -> StoreError {
        StoreError::Unavailable("simulated outage".to_string())
    }
}

#[async_trait]
impl BookStore for FailingStore {
    async fn find_all(&self) -> Result<Vec<Book>, StoreError> {
        Err(Self::error())
    }

    async fn find_by_id(&self, _id: DbId) -> Result<Option<Book>, StoreError> {
        Err(Self::error())
    }

    async fn create(&self, _book: &NewBook) -> Result<Book, StoreError> {
        Err(Self::error())
    }

    async fn update(&self, _id: DbId, _patch: &BookPatch) -> Result<Option<Book>, StoreError> {
        Err(Self::error())
    }

    async fn delete(&self, _id: DbId) -> Result<Option<Book>, StoreError> {
        Err(Self::error())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(Self::error())
    }
}

// ---------------------------------------------------------------------------
// Store failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failures_answer_a_sanitized_500() {
    let app = common::build_app_with_store(Arc::new(FailingStore));
    let response = get(app, "/api/v1/books").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_string(response).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"]["code"], 500);
    assert_eq!(json["error"]["message"], "An internal error occurred");
    // The store's own message must never reach the client.
    assert!(!body.contains("simulated outage"));
}

#[tokio::test]
async fn store_failures_on_writes_use_the_same_shape() {
    let app = common::build_app_with_store(Arc::new(FailingStore));
    let response = post_json(app, "/api/v1/books", serde_json::json!({"title": "Dune"})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], 500);
}

#[tokio::test]
async fn health_reports_a_degraded_store() {
    let app = common::build_app_with_store(Arc::new(FailingStore));
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

// ---------------------------------------------------------------------------
// Payload decoding failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_json_bodies_are_rejected_with_the_envelope() {
    let app = common::build_test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/books")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], 400);
    let message = json["error"]["message"].as_str().unwrap();
    assert!(message.starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn non_object_json_payloads_are_rejected() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/v1/books", serde_json::json!([1, 2, 3])).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["message"], "Expected a JSON object");
}
