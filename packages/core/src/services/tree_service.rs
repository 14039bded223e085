//! Tree Service - Core CRUD Operations
//!
//! This module provides the main business logic layer for tree operations:
//!
//! - CRUD operations (list, get, create, rename)
//! - Hierarchy management (reparent)
//! - Cascade delete (node plus every transitive descendant)
//!
//! # Root Protection
//!
//! The root node (id 1, NULL parent) is seeded by the database layer and can
//! never be deleted. Every other node must reference an existing parent.
//!
//! # Cascade Delete
//!
//! Subtree collection is iterative with an explicit work stack, so arbitrarily
//! deep trees cannot exhaust the call stack. The collected ids are removed
//! leaves-first in a single atomic statement, so no dangling parent reference
//! can be observed.

use crate::db::NodeStore;
use crate::models::{DeleteResult, TreeNode, TreeViewRow, ROOT_NODE_ID};
use crate::services::error::TreeServiceError;
use std::sync::Arc;
use tracing::debug;

/// Business logic layer over a [`NodeStore`]
///
/// # Examples
///
/// ```rust,no_run
/// use arbor_core::db::{DatabaseService, NodeStore, TursoStore};
/// use arbor_core::services::TreeService;
/// use std::path::PathBuf;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let db = Arc::new(DatabaseService::new(PathBuf::from("./arbor.db")).await?);
///     let store: Arc<dyn NodeStore> = Arc::new(TursoStore::new(db));
///     let service = TreeService::new(store);
///
///     let node = service.create_node("Inbox", 1).await?;
///     println!("Created node {}", node.id);
///     Ok(())
/// }
/// ```
pub struct TreeService {
    store: Arc<dyn NodeStore>,
}

impl TreeService {
    /// Create a new TreeService over the given store
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }

    /// Access the underlying store
    pub fn store(&self) -> &Arc<dyn NodeStore> {
        &self.store
    }

    /// Return every node; callers derive the hierarchy from `parent_id`
    pub async fn list_nodes(&self) -> Result<Vec<TreeNode>, TreeServiceError> {
        Ok(self.store.list_nodes().await?)
    }

    /// Return every node as a listing row with the derived `droppable` flag
    pub async fn list_rows(&self) -> Result<Vec<TreeViewRow>, TreeServiceError> {
        let nodes = self.store.list_nodes().await?;
        Ok(TreeViewRow::from_nodes(&nodes))
    }

    /// Get a single node by id
    ///
    /// # Errors
    ///
    /// `NodeNotFound` if the id is absent.
    pub async fn get_node(&self, id: i64) -> Result<TreeNode, TreeServiceError> {
        self.store
            .get_node(id)
            .await?
            .ok_or_else(|| TreeServiceError::node_not_found(id))
    }

    /// Create a node under an existing parent
    ///
    /// The id is assigned by the store.
    ///
    /// # Errors
    ///
    /// `InvalidParent` if `parent_id` does not reference an existing node;
    /// the store is left unchanged in that case.
    pub async fn create_node(
        &self,
        label: &str,
        parent_id: i64,
    ) -> Result<TreeNode, TreeServiceError> {
        let parent_exists = self.store.get_node(parent_id).await?.is_some();
        if !parent_exists {
            return Err(TreeServiceError::invalid_parent(parent_id));
        }

        let node = self.store.insert_node(label, parent_id).await?;
        debug!(id = node.id, parent_id, "created node");
        Ok(node)
    }

    /// Rename a node
    ///
    /// # Errors
    ///
    /// `NodeNotFound` if the id is absent; nothing is written in that case.
    pub async fn rename_node(
        &self,
        id: i64,
        label: &str,
    ) -> Result<TreeNode, TreeServiceError> {
        let updated = self.store.set_label(id, label).await?;
        if !updated {
            return Err(TreeServiceError::node_not_found(id));
        }

        self.store
            .get_node(id)
            .await?
            .ok_or_else(|| TreeServiceError::node_not_found(id))
    }

    /// Move a node (and implicitly its whole subtree) under a new parent
    ///
    /// Moving a node under itself is rejected. Moving a node under one of its
    /// own descendants is not detected; the caller owns that invariant.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if either the node or the new parent is absent
    /// - `InvalidParent` for a self-move
    pub async fn reparent_node(
        &self,
        id: i64,
        new_parent_id: i64,
    ) -> Result<TreeNode, TreeServiceError> {
        if id == new_parent_id {
            return Err(TreeServiceError::invalid_parent(new_parent_id));
        }

        if self.store.get_node(id).await?.is_none() {
            return Err(TreeServiceError::node_not_found(id));
        }
        if self.store.get_node(new_parent_id).await?.is_none() {
            return Err(TreeServiceError::node_not_found(new_parent_id));
        }

        self.store.set_parent(id, new_parent_id).await?;
        debug!(id, new_parent_id, "reparented node");

        self.store
            .get_node(id)
            .await?
            .ok_or_else(|| TreeServiceError::node_not_found(id))
    }

    /// Delete a node together with every transitive descendant
    ///
    /// # Errors
    ///
    /// - `RootDeletionForbidden` for id 1, regardless of store state
    /// - `NodeNotFound` if the id is absent; nothing is deleted in that case
    pub async fn delete_node(&self, id: i64) -> Result<DeleteResult, TreeServiceError> {
        if id == ROOT_NODE_ID {
            return Err(TreeServiceError::RootDeletionForbidden);
        }

        if self.store.get_node(id).await?.is_none() {
            return Err(TreeServiceError::node_not_found(id));
        }

        let subtree = self.collect_subtree(id).await?;
        let deleted_count = self.store.delete_nodes(&subtree).await?;
        debug!(id, deleted_count, "deleted subtree");

        Ok(DeleteResult { deleted_count })
    }

    /// Collect a node and all of its descendants, children before parents
    ///
    /// Iterative traversal with an explicit work stack; a pathologically deep
    /// tree must not overflow the call stack. The visit order puts every
    /// parent before its children, so the reversed list is safe to delete
    /// front-to-back as well as atomically.
    async fn collect_subtree(&self, id: i64) -> Result<Vec<i64>, TreeServiceError> {
        let mut pending = vec![id];
        let mut visited = Vec::new();

        while let Some(current) = pending.pop() {
            visited.push(current);
            for child in self.store.get_children(current).await? {
                pending.push(child.id);
            }
        }

        visited.reverse();
        Ok(visited)
    }
}
