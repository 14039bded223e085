//! NodeStore Trait - Database Abstraction Layer
//!
//! This module defines the `NodeStore` trait that abstracts node persistence
//! for Arbor. The trait is the seam between `TreeService` business logic and
//! the storage backend, so the service can be exercised against any
//! implementation.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: all methods are async to match the libsql backend
//! 2. **No business rules**: parent validation, root protection, and subtree
//!    collection belong to the service layer; the store only moves rows
//! 3. **Error Handling**: `anyhow::Result` for flexible error context at the
//!    trait boundary; implementations attach their own typed errors
//!
//! # Examples
//!
//! ```rust,no_run
//! use arbor_core::db::{DatabaseService, NodeStore, TursoStore};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let db = Arc::new(DatabaseService::new(PathBuf::from("./arbor.db")).await?);
//!     let store: Arc<dyn NodeStore> = Arc::new(TursoStore::new(db));
//!
//!     let node = store.insert_node("Inbox", 1).await?;
//!     println!("Created node {}", node.id);
//!     Ok(())
//! }
//! ```

use crate::models::TreeNode;
use anyhow::Result;
use async_trait::async_trait;

/// Abstraction layer for node persistence operations
///
/// Implementations must be `Send + Sync` to allow usage in async contexts
/// where futures may be moved between threads.
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Insert a node with a generated id and return the stored row
    ///
    /// The caller guarantees `parent_id` references an existing node.
    async fn insert_node(&self, label: &str, parent_id: i64) -> Result<TreeNode>;

    /// Get node by id
    ///
    /// # Returns
    ///
    /// - `Ok(Some(node))` if the node exists
    /// - `Ok(None)` if the node doesn't exist (not an error)
    /// - `Err(_)` if a database error occurs
    async fn get_node(&self, id: i64) -> Result<Option<TreeNode>>;

    /// Full scan of every node, ordered by id
    async fn list_nodes(&self) -> Result<Vec<TreeNode>>;

    /// Direct children of `parent_id`, ordered by id
    async fn get_children(&self, parent_id: i64) -> Result<Vec<TreeNode>>;

    /// Update a node's label
    ///
    /// Returns `true` if a row was updated, `false` if the id was absent.
    async fn set_label(&self, id: i64, label: &str) -> Result<bool>;

    /// Update a node's parent pointer
    ///
    /// Returns `true` if a row was updated, `false` if the id was absent.
    /// The caller guarantees `new_parent_id` references an existing node.
    async fn set_parent(&self, id: i64, new_parent_id: i64) -> Result<bool>;

    /// Delete a batch of nodes atomically, returning the removed row count
    ///
    /// The batch must contain a node together with all of its descendants so
    /// no dangling parent reference survives. Ordering within the batch does
    /// not matter; the whole batch is removed in a single statement.
    async fn delete_nodes(&self, ids: &[i64]) -> Result<u64>;

    /// Flush pending writes and release resources before shutdown
    async fn close(&self) -> Result<()>;
}
