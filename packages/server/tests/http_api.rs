//! HTTP API Integration Tests
//!
//! Drives the full router in-process (no sockets) against a fresh database
//! per test, exercising the wire format and the status-code mapping.

use arbor_core::db::{DatabaseService, NodeStore, TursoStore};
use arbor_core::services::TreeService;
use arbor_server::{create_router, AppState};
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Build a router over a fresh seeded database
async fn test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let db = Arc::new(DatabaseService::new(db_path).await.unwrap());
    let store: Arc<dyn NodeStore> = Arc::new(TursoStore::new(db));
    let tree = Arc::new(TreeService::new(store));

    (create_router(AppState { tree }), temp_dir)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> Response<axum::body::Body> {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response<axum::body::Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST a node and return its assigned id
async fn create_node(app: &Router, label: &str, parent_id: i64) -> i64 {
    let response = send(
        app,
        "POST",
        "/api/treeviews",
        Some(json!({ "label": label, "parentId": parent_id })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    body_json(response).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _temp) = test_app().await;

    let response = send(&app, "GET", "/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn list_starts_with_seeded_root() {
    let (app, _temp) = test_app().await;

    let response = send(&app, "GET", "/api/treeviews", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], 1);
    assert_eq!(rows[0]["label"], "Root");
    assert!(rows[0]["parentId"].is_null());
    assert_eq!(rows[0]["droppable"], false);
}

#[tokio::test]
async fn create_returns_node_and_marks_parent_droppable() {
    let (app, _temp) = test_app().await;

    let response = send(
        &app,
        "POST",
        "/api/treeviews",
        Some(json!({ "label": "Inbox", "parentId": 1 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["label"], "Inbox");
    assert_eq!(created["parentId"], 1);
    let id = created["id"].as_i64().unwrap();
    assert!(id > 1);

    let list = body_json(send(&app, "GET", "/api/treeviews", None).await).await;
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let root = rows.iter().find(|r| r["id"] == 1).unwrap();
    assert_eq!(root["droppable"], true);
}

#[tokio::test]
async fn create_with_missing_parent_is_rejected() {
    let (app, _temp) = test_app().await;

    let response = send(
        &app,
        "POST",
        "/api/treeviews",
        Some(json!({ "label": "X", "parentId": 99 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Row count identical before and after
    let list = body_json(send(&app, "GET", "/api/treeviews", None).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_single_node() {
    let (app, _temp) = test_app().await;
    let id = create_node(&app, "A", 1).await;

    let response = send(&app, "GET", &format!("/api/treeviews/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["label"], "A");

    let response = send(&app, "GET", "/api/treeviews/99", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rename_updates_label() {
    let (app, _temp) = test_app().await;
    let id = create_node(&app, "Before", 1).await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/treeviews/{}", id),
        Some(json!({ "label": "After" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["label"], "After");
}

#[tokio::test]
async fn rename_missing_node_is_404() {
    let (app, _temp) = test_app().await;

    let response = send(
        &app,
        "PUT",
        "/api/treeviews/99",
        Some(json!({ "label": "Ghost" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_cascades_to_descendants() {
    let (app, _temp) = test_app().await;

    // root(1) -> A -> B
    let a = create_node(&app, "A", 1).await;
    let b = create_node(&app, "B", a).await;

    let response = send(&app, "DELETE", &format!("/api/treeviews/{}", a), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let list = body_json(send(&app, "GET", "/api/treeviews", None).await).await;
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], 1);

    let response = send(&app, "GET", &format!("/api/treeviews/{}", b), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_root_is_unprocessable() {
    let (app, _temp) = test_app().await;

    let response = send(&app, "DELETE", "/api/treeviews/1", None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let list = body_json(send(&app, "GET", "/api/treeviews", None).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_missing_node_is_404() {
    let (app, _temp) = test_app().await;

    let response = send(&app, "DELETE", "/api/treeviews/99", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn move_relocates_node() {
    let (app, _temp) = test_app().await;

    let a = create_node(&app, "A", 1).await;
    let b = create_node(&app, "B", 1).await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/treeviews/{}/move", b),
        Some(json!({ "newParentId": a })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["parentId"], a);
}

#[tokio::test]
async fn move_with_missing_endpoint_is_404() {
    let (app, _temp) = test_app().await;
    let a = create_node(&app, "A", 1).await;

    let response = send(
        &app,
        "PUT",
        "/api/treeviews/99/move",
        Some(json!({ "newParentId": a })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        "PUT",
        &format!("/api/treeviews/{}/move", a),
        Some(json!({ "newParentId": 98 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn move_onto_itself_is_rejected() {
    let (app, _temp) = test_app().await;
    let a = create_node(&app, "A", 1).await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/treeviews/{}/move", a),
        Some(json!({ "newParentId": a })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
