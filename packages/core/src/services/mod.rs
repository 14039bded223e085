//! Business Services
//!
//! This module contains the core business logic:
//!
//! - `TreeService` - tree CRUD, reparenting, and cascade delete
//!
//! Services coordinate between the database layer and application logic,
//! implementing the rules the store itself does not enforce: parent
//! validation, root protection, and subtree collection.

pub mod error;
pub mod tree_service;

#[cfg(test)]
mod tree_service_test;

pub use error::TreeServiceError;
pub use tree_service::TreeService;
