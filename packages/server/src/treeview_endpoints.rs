//! Tree View Endpoints
//!
//! REST handlers over the tree service. Handlers stay thin: body parsing and
//! status selection here, every rule (parent validation, root protection,
//! cascade) in `TreeService`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AppState, HttpError};
use arbor_core::models::{TreeNode, TreeViewRow};

/// Body for POST /api/treeviews
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTreeView {
    label: String,
    parent_id: i64,
}

/// Body for PUT /api/treeviews/:id
#[derive(Debug, Deserialize)]
struct UpdateTreeView {
    label: String,
}

/// Body for PUT /api/treeviews/:id/move
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveTreeView {
    new_parent_id: i64,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthStatus {
    status: String,
    version: String,
}

/// Build the treeview route table
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/treeviews", get(list_treeviews).post(create_treeview))
        .route(
            "/api/treeviews/:id",
            get(get_treeview)
                .put(update_treeview)
                .delete(delete_treeview),
        )
        .route("/api/treeviews/:id/move", put(move_treeview))
        .with_state(state)
}

/// Health check endpoint
///
/// Returns server status and version information. Useful for verifying that
/// the server is up before pointing a client at it.
async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List every node with its derived droppable flag
async fn list_treeviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<TreeViewRow>>, HttpError> {
    let rows = state.tree.list_rows().await?;
    Ok(Json(rows))
}

/// Get a single node by id
async fn get_treeview(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TreeNode>, HttpError> {
    let node = state.tree.get_node(id).await?;
    Ok(Json(node))
}

/// Create a node under an existing parent
async fn create_treeview(
    State(state): State<AppState>,
    Json(body): Json<CreateTreeView>,
) -> Result<(StatusCode, Json<TreeNode>), HttpError> {
    let node = state.tree.create_node(&body.label, body.parent_id).await?;
    debug!(id = node.id, "created treeview node");
    Ok((StatusCode::CREATED, Json(node)))
}

/// Rename a node
async fn update_treeview(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTreeView>,
) -> Result<Json<TreeNode>, HttpError> {
    let node = state.tree.rename_node(id, &body.label).await?;
    Ok(Json(node))
}

/// Delete a node and its whole subtree
async fn delete_treeview(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let result = state.tree.delete_node(id).await?;
    debug!(id, deleted = result.deleted_count, "deleted treeview node");
    Ok(StatusCode::NO_CONTENT)
}

/// Move a node under a new parent
async fn move_treeview(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<MoveTreeView>,
) -> Result<Json<TreeNode>, HttpError> {
    let node = state.tree.reparent_node(id, body.new_parent_id).await?;
    Ok(Json(node))
}
