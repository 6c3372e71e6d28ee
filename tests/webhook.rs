//! Webhook endpoint integration tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use herald_gateway::DbPool;
use herald_gateway::api::{ApiServer, ApiState};
use herald_gateway::db::HistoryRepo;
use tower::ServiceExt;

mod common;
use common::{setup_test_db, test_config};

/// Build a test API router
fn build_test_router(db: DbPool, webhook_secret: Option<&str>) -> axum::Router {
    let config = test_config(webhook_secret);
    let state = Arc::new(ApiState::new(db, &config));
    ApiServer::new(state, 0).router()
}

fn webhook_request(secret_header: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/webhooks/telegram")
        .header("content-type", "application/json");

    if let Some(secret) = secret_header {
        builder = builder.header("x-telegram-bot-api-secret-token", secret);
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let db = setup_test_db();
    let app = build_test_router(db, None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_missing_secret_rejected_without_processing() {
    let db = setup_test_db();
    let history = HistoryRepo::new(db.clone());
    let app = build_test_router(db, Some("hunter2"));

    // A text update that would normally start the reply workflow
    let update = serde_json::json!({
        "update_id": 1,
        "message": {
            "message_id": 10,
            "chat": {"id": 42, "type": "private"},
            "text": "hello"
        }
    });

    let response = app.oneshot(webhook_request(None, update)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ok"], false);

    // Rejected before dispatch: nothing persisted
    assert_eq!(history.message_count(42).unwrap(), 0);
}

#[tokio::test]
async fn test_wrong_secret_rejected() {
    let db = setup_test_db();
    let app = build_test_router(db, Some("hunter2"));

    let update = serde_json::json!({"update_id": 2, "message": null});

    let response = app
        .oneshot(webhook_request(Some("wrong"), update))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_without_message_acknowledged() {
    let db = setup_test_db();
    let history = HistoryRepo::new(db.clone());
    let app = build_test_router(db, None);

    let update = serde_json::json!({"update_id": 3, "message": null});

    let response = app.oneshot(webhook_request(None, update)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ok"], true);

    assert_eq!(history.message_count(42).unwrap(), 0);
}

#[tokio::test]
async fn test_matching_secret_accepted() {
    let db = setup_test_db();
    let app = build_test_router(db, Some("hunter2"));

    let update = serde_json::json!({"update_id": 4, "message": null});

    let response = app
        .oneshot(webhook_request(Some("hunter2"), update))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
