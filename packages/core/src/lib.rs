//! Arbor Core Tree Logic Layer
//!
//! This crate provides the data model, persistence layer, and tree service
//! for the Arbor outline editor.
//!
//! # Architecture
//!
//! - **Adjacency-list tree**: one `nodes` table with a nullable self-referencing
//!   `parent_id` column; the hierarchy is derived by callers from the flat list
//! - **Fixed root**: row id 1 has no parent, is seeded at startup, and is never
//!   deleted
//! - **libsql**: embedded SQLite-compatible database behind a `NodeStore` trait
//!
//! # Modules
//!
//! - [`models`] - Data structures (TreeNode, TreeViewRow, DeleteResult)
//! - [`services`] - Business services (TreeService)
//! - [`db`] - Database layer with libsql integration

pub mod db;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use db::{DatabaseService, NodeStore, TursoStore};
pub use models::*;
pub use services::*;
