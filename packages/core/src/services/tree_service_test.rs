//! Scenario Tests for Tree Consistency
//!
//! Exercises the guarantees the tree service makes about reparenting and
//! cascade deletion against a real libsql store.

use crate::db::{DatabaseService, NodeStore, TursoStore};
use crate::models::ROOT_NODE_ID;
use crate::services::{TreeService, TreeServiceError};
use std::sync::Arc;
use tempfile::TempDir;

/// Helper to create a test service over a fresh database
async fn create_test_service() -> (TreeService, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let db = Arc::new(DatabaseService::new(db_path).await.unwrap());
    let store: Arc<dyn NodeStore> = Arc::new(TursoStore::new(db));

    (TreeService::new(store), temp_dir)
}

#[tokio::test]
async fn test_cascade_delete_removes_descendants() {
    let (service, _temp) = create_test_service().await;

    // root(1) -> A -> B
    let a = service.create_node("A", ROOT_NODE_ID).await.unwrap();
    let b = service.create_node("B", a.id).await.unwrap();

    let result = service.delete_node(a.id).await.unwrap();
    assert_eq!(result.deleted_count, 2);

    let remaining = service.list_nodes().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].is_root());

    // No row may still reference the deleted ids
    assert!(!remaining
        .iter()
        .any(|n| n.parent_id == Some(a.id) || n.parent_id == Some(b.id)));
}

#[tokio::test]
async fn test_cascade_delete_spares_siblings() {
    let (service, _temp) = create_test_service().await;

    let doomed = service.create_node("Doomed", ROOT_NODE_ID).await.unwrap();
    service.create_node("Victim?", doomed.id).await.unwrap();
    let sibling = service.create_node("Sibling", ROOT_NODE_ID).await.unwrap();

    service.delete_node(doomed.id).await.unwrap();

    let remaining = service.list_nodes().await.unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().any(|n| n.id == sibling.id));
}

#[tokio::test]
async fn test_delete_handles_deep_chains() {
    let (service, _temp) = create_test_service().await;

    // A 200-level chain would blow a naive recursive traversal well before a
    // realistic outline would
    let mut parent = ROOT_NODE_ID;
    let mut first = None;
    for depth in 0..200 {
        let node = service
            .create_node(&format!("level {}", depth), parent)
            .await
            .unwrap();
        first.get_or_insert(node.id);
        parent = node.id;
    }

    let result = service.delete_node(first.unwrap()).await.unwrap();
    assert_eq!(result.deleted_count, 200);
    assert_eq!(service.list_nodes().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_root_is_forbidden() {
    let (service, _temp) = create_test_service().await;

    let err = service.delete_node(ROOT_NODE_ID).await.unwrap_err();
    assert!(matches!(err, TreeServiceError::RootDeletionForbidden));

    // Still forbidden with children present
    service.create_node("A", ROOT_NODE_ID).await.unwrap();
    let err = service.delete_node(ROOT_NODE_ID).await.unwrap_err();
    assert!(matches!(err, TreeServiceError::RootDeletionForbidden));
}

#[tokio::test]
async fn test_delete_missing_node_mutates_nothing() {
    let (service, _temp) = create_test_service().await;

    service.create_node("A", ROOT_NODE_ID).await.unwrap();
    let before = service.list_nodes().await.unwrap();

    let err = service.delete_node(99).await.unwrap_err();
    assert!(matches!(err, TreeServiceError::NodeNotFound { id: 99 }));
    assert_eq!(service.list_nodes().await.unwrap(), before);
}

#[tokio::test]
async fn test_create_rejects_missing_parent() {
    let (service, _temp) = create_test_service().await;

    let before = service.list_nodes().await.unwrap();

    let err = service.create_node("X", 99).await.unwrap_err();
    assert!(matches!(err, TreeServiceError::InvalidParent { parent_id: 99 }));

    // Row count identical before and after
    assert_eq!(service.list_nodes().await.unwrap(), before);
}

#[tokio::test]
async fn test_reparent_updates_parent_pointer() {
    let (service, _temp) = create_test_service().await;

    let a = service.create_node("A", ROOT_NODE_ID).await.unwrap();
    let b = service.create_node("B", ROOT_NODE_ID).await.unwrap();

    let moved = service.reparent_node(b.id, a.id).await.unwrap();
    assert_eq!(moved.parent_id, Some(a.id));
    assert_eq!(
        service.get_node(b.id).await.unwrap().parent_id,
        Some(a.id)
    );
}

#[tokio::test]
async fn test_reparent_missing_endpoints() {
    let (service, _temp) = create_test_service().await;

    let a = service.create_node("A", ROOT_NODE_ID).await.unwrap();

    let err = service.reparent_node(99, a.id).await.unwrap_err();
    assert!(matches!(err, TreeServiceError::NodeNotFound { id: 99 }));

    let err = service.reparent_node(a.id, 98).await.unwrap_err();
    assert!(matches!(err, TreeServiceError::NodeNotFound { id: 98 }));

    assert_eq!(
        service.get_node(a.id).await.unwrap().parent_id,
        Some(ROOT_NODE_ID)
    );
}

#[tokio::test]
async fn test_reparent_onto_itself_is_rejected() {
    let (service, _temp) = create_test_service().await;

    let a = service.create_node("A", ROOT_NODE_ID).await.unwrap();

    let err = service.reparent_node(a.id, a.id).await.unwrap_err();
    assert!(matches!(err, TreeServiceError::InvalidParent { .. }));
    assert_eq!(
        service.get_node(a.id).await.unwrap().parent_id,
        Some(ROOT_NODE_ID)
    );
}

#[tokio::test]
async fn test_rename_missing_node() {
    let (service, _temp) = create_test_service().await;

    let err = service.rename_node(99, "Ghost").await.unwrap_err();
    assert!(matches!(err, TreeServiceError::NodeNotFound { id: 99 }));
}

#[tokio::test]
async fn test_rename_updates_label_only() {
    let (service, _temp) = create_test_service().await;

    let a = service.create_node("Before", ROOT_NODE_ID).await.unwrap();
    let renamed = service.rename_node(a.id, "After").await.unwrap();

    assert_eq!(renamed.label, "After");
    assert_eq!(renamed.parent_id, a.parent_id);
}

#[tokio::test]
async fn test_list_rows_marks_parents_droppable() {
    let (service, _temp) = create_test_service().await;

    let a = service.create_node("A", ROOT_NODE_ID).await.unwrap();
    service.create_node("B", a.id).await.unwrap();

    let rows = service.list_rows().await.unwrap();
    let row = |id: i64| rows.iter().find(|r| r.id == id).unwrap();

    assert!(row(ROOT_NODE_ID).droppable);
    assert!(row(a.id).droppable);
    assert_eq!(rows.iter().filter(|r| !r.droppable).count(), 1);
}

#[tokio::test]
async fn test_store_close_flushes() {
    let (service, _temp) = create_test_service().await;

    service.create_node("A", ROOT_NODE_ID).await.unwrap();
    service.store().close().await.unwrap();
}
