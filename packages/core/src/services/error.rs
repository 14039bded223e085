//! Service Layer Error Types
//!
//! This module defines error types for service-layer operations. Each variant
//! maps onto exactly one HTTP status in the server crate, so the taxonomy
//! stays small on purpose.

use thiserror::Error;

/// Tree service operation errors
#[derive(Error, Debug)]
pub enum TreeServiceError {
    /// Node not found by id
    #[error("Node not found: {id}")]
    NodeNotFound { id: i64 },

    /// Invalid parent reference
    #[error("Invalid parent node: {parent_id}")]
    InvalidParent { parent_id: i64 },

    /// Delete requested for the tree root
    #[error("Deletion of the root node is not allowed")]
    RootDeletionForbidden,

    /// Storage operation failed
    #[error("Storage operation failed: {0}")]
    Storage(#[from] anyhow::Error),
}

impl TreeServiceError {
    /// Create a node not found error
    pub fn node_not_found(id: i64) -> Self {
        Self::NodeNotFound { id }
    }

    /// Create an invalid parent error
    pub fn invalid_parent(parent_id: i64) -> Self {
        Self::InvalidParent { parent_id }
    }
}
