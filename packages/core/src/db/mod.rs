//! Database Layer
//!
//! This module handles all database interactions using libsql:
//!
//! - Database connection management and idempotent schema initialization
//! - Root row seeding (id 1, NULL parent)
//! - Raw SQL operations behind the `NodeStore` abstraction
//!
//! # Architecture
//!
//! `DatabaseService` owns the libsql connection and the SQL statements.
//! `TursoStore` wraps it to implement the `NodeStore` trait, which is the
//! seam between `TreeService` business logic and the storage backend.

mod database;
mod error;
mod node_store;
mod turso_store;

pub use database::DatabaseService;
pub use error::DatabaseError;
pub use node_store::NodeStore;
pub use turso_store::TursoStore;
