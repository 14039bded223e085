//! Tree Node Data Structures
//!
//! This module defines the core `TreeNode` struct and related types for
//! Arbor's adjacency-list tree model.
//!
//! # Architecture
//!
//! - **Parent-pointer adjacency**: every node carries an optional `parent_id`;
//!   the tree shape is derived from the flat node list
//! - **Server-assigned ids**: ids come from the database's auto-increment
//!   primary key, never from callers
//! - **Fixed root**: id 1, `parent_id = None`, seeded at startup
//!
//! # Examples
//!
//! ```rust
//! use arbor_core::models::{TreeNode, ROOT_NODE_ID};
//!
//! let node = TreeNode {
//!     id: 2,
//!     label: "Projects".to_string(),
//!     parent_id: Some(ROOT_NODE_ID),
//! };
//! assert!(!node.is_root());
//! ```

use serde::{Deserialize, Serialize};

/// Id of the tree root.
///
/// The root row is seeded at startup with this id and a NULL parent, and
/// delete requests against it are rejected.
pub const ROOT_NODE_ID: i64 = 1;

/// A single tree entry as persisted in the `nodes` table.
///
/// # Fields
///
/// - `id`: unique identifier, assigned by the database on insert
/// - `label`: display text of the node
/// - `parent_id`: reference to the parent node, `None` only for the root
///
/// Wire format uses camelCase field names (`parentId`), matching the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: i64,
    pub label: String,
    pub parent_id: Option<i64>,
}

impl TreeNode {
    /// Whether this node is the tree root.
    pub fn is_root(&self) -> bool {
        self.id == ROOT_NODE_ID
    }
}

/// A listing row for the full-tree endpoint.
///
/// Identical to [`TreeNode`] plus the derived `droppable` flag: true iff at
/// least one other node currently points at this node as its parent. The flag
/// drives the expand/collapse affordance in clients and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeViewRow {
    pub id: i64,
    pub label: String,
    pub parent_id: Option<i64>,
    pub droppable: bool,
}

impl TreeViewRow {
    /// Derive listing rows from a flat node list.
    ///
    /// `droppable` is computed against the given list only, so the input must
    /// be the complete node set for the flags to be correct.
    pub fn from_nodes(nodes: &[TreeNode]) -> Vec<TreeViewRow> {
        nodes
            .iter()
            .map(|node| TreeViewRow {
                id: node.id,
                label: node.label.clone(),
                parent_id: node.parent_id,
                droppable: nodes.iter().any(|other| other.parent_id == Some(node.id)),
            })
            .collect()
    }
}

/// Result of a cascade delete operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    /// Number of rows removed (the node plus all of its descendants).
    pub deleted_count: u64,
}
