//! TursoStore - NodeStore Implementation for libsql
//!
//! Thin wrapper around `DatabaseService` that implements the `NodeStore`
//! trait. All SQL lives in `DatabaseService`; this type handles delegation
//! and libsql::Row to `TreeNode` conversion.

use crate::db::node_store::NodeStore;
use crate::db::DatabaseService;
use crate::models::TreeNode;
use anyhow::{Context, Result};
use async_trait::async_trait;
use libsql::Row;
use std::sync::Arc;

/// NodeStore implementation backed by libsql
pub struct TursoStore {
    /// Underlying database service (owns connections and SQL)
    db: Arc<DatabaseService>,
}

impl TursoStore {
    /// Create a new TursoStore wrapper
    pub fn new(db: Arc<DatabaseService>) -> Self {
        Self { db }
    }

    /// Convert a libsql::Row to a TreeNode
    ///
    /// Expected columns (in order): id (INTEGER), label (TEXT),
    /// parent_id (INTEGER, nullable). This is the central conversion point
    /// for all query operations.
    fn row_to_node(row: &Row) -> Result<TreeNode> {
        let id: i64 = row.get(0).context("Failed to get id")?;
        let label: String = row.get(1).context("Failed to get label")?;
        let parent_id: Option<i64> = row.get(2).context("Failed to get parent_id")?;

        Ok(TreeNode {
            id,
            label,
            parent_id,
        })
    }

    /// Drain a libsql::Rows cursor into TreeNodes
    async fn collect_nodes(mut rows: libsql::Rows) -> Result<Vec<TreeNode>> {
        let mut nodes = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to fetch row: {}", e))?
        {
            nodes.push(Self::row_to_node(&row)?);
        }
        Ok(nodes)
    }
}

#[async_trait]
impl NodeStore for TursoStore {
    async fn insert_node(&self, label: &str, parent_id: i64) -> Result<TreeNode> {
        let id = self
            .db
            .db_insert_node(label, parent_id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to insert node: {}", e))?;

        // Fetch and return the created node
        self.get_node(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Node not found after creation"))
    }

    async fn get_node(&self, id: i64) -> Result<Option<TreeNode>> {
        match self
            .db
            .db_get_node(id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get node: {}", e))?
        {
            Some(row) => Ok(Some(Self::row_to_node(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_nodes(&self) -> Result<Vec<TreeNode>> {
        let rows = self
            .db
            .db_list_nodes()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to list nodes: {}", e))?;

        Self::collect_nodes(rows).await
    }

    async fn get_children(&self, parent_id: i64) -> Result<Vec<TreeNode>> {
        let rows = self
            .db
            .db_get_children(parent_id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get children: {}", e))?;

        Self::collect_nodes(rows).await
    }

    async fn set_label(&self, id: i64, label: &str) -> Result<bool> {
        let affected = self
            .db
            .db_update_label(id, label)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to update label: {}", e))?;

        Ok(affected > 0)
    }

    async fn set_parent(&self, id: i64, new_parent_id: i64) -> Result<bool> {
        let affected = self
            .db
            .db_update_parent(id, new_parent_id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to update parent: {}", e))?;

        Ok(affected > 0)
    }

    async fn delete_nodes(&self, ids: &[i64]) -> Result<u64> {
        self.db
            .db_delete_nodes(ids)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to delete nodes: {}", e))
    }

    async fn close(&self) -> Result<()> {
        self.db
            .db_close()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to close database: {}", e))
    }
}
