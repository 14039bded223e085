//! Data Models
//!
//! This module contains the core data structures used throughout Arbor:
//!
//! - `TreeNode` - a single persisted tree entry (id, label, parent pointer)
//! - `TreeViewRow` - a listing row enriched with the derived `droppable` flag
//! - `DeleteResult` - outcome of a cascade delete
//!
//! The hierarchy itself is implicit: every node except the root points at its
//! parent, and callers derive child lists from the flat node list.

mod node;

pub use node::{DeleteResult, TreeNode, TreeViewRow, ROOT_NODE_ID};
