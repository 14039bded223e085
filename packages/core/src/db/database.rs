//! Database Connection Management
//!
//! This module provides the core database connection and initialization
//! functionality using libsql for Arbor's adjacency-list tree storage.
//!
//! # Architecture
//!
//! - **Path-agnostic**: accepts any valid PathBuf for the database file
//! - **Single table**: `nodes(id, label, parent_id)` with a self-referencing
//!   foreign key; no migrations required
//! - **WAL mode**: Write-Ahead Logging for better concurrency
//! - **Foreign keys**: enabled for referential integrity
//! - **Seeded root**: row `(1, 'Root', NULL)` inserted at startup if absent
//!
//! # Database Connection Patterns
//!
//! Use `connect_with_timeout()` in async functions. The busy timeout lets
//! concurrent operations wait and retry instead of failing immediately with
//! `SQLITE_BUSY` errors when the Tokio runtime interleaves statements.

use crate::db::error::DatabaseError;
use crate::models::ROOT_NODE_ID;
use libsql::{Builder, Database};
use std::path::PathBuf;
use std::sync::Arc;

/// Database service for managing the libsql connection and schema
///
/// # Examples
///
/// ```no_run
/// use arbor_core::db::DatabaseService;
/// use std::path::PathBuf;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let db_path = PathBuf::from("./data/arbor.db");
///     let db_service = DatabaseService::new(db_path).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseService {
    /// libsql database handle (wrapped in Arc for sharing)
    pub db: Arc<Database>,

    /// Path to the database file
    pub db_path: PathBuf,
}

impl DatabaseService {
    /// Create a new DatabaseService with the specified database path
    ///
    /// This will:
    /// 1. Ensure the parent directory exists (create if needed)
    /// 2. Open/create the database file
    /// 3. Initialize the schema (CREATE TABLE IF NOT EXISTS)
    /// 4. Seed the root row if absent
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if:
    /// - Parent directory cannot be created
    /// - Database connection fails
    /// - Schema initialization or root seeding fails
    pub async fn new(db_path: PathBuf) -> Result<Self, DatabaseError> {
        // Only checkpoint the WAL for databases created by this call
        let is_new_database = !db_path.exists();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(DatabaseError::DirectoryCreationFailed)?;
            }
        }

        // Open database connection using Builder pattern
        let db = Builder::new_local(&db_path)
            .build()
            .await
            .map_err(|e| DatabaseError::connection_failed(db_path.clone(), e))?;

        let service = Self {
            db: Arc::new(db),
            db_path,
        };

        service.initialize_schema(is_new_database).await?;

        Ok(service)
    }

    /// Execute a PRAGMA statement
    ///
    /// PRAGMA statements return rows, so we must use query() instead of
    /// execute(). This helper encapsulates that pattern.
    async fn execute_pragma(
        &self,
        conn: &libsql::Connection,
        pragma: &str,
    ) -> Result<(), DatabaseError> {
        let mut stmt = conn.prepare(pragma).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        let _ = stmt.query(()).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        Ok(())
    }

    /// Initialize database schema and configuration
    ///
    /// Creates the table and index using CREATE TABLE IF NOT EXISTS, ensuring
    /// idempotent initialization (safe to call multiple times), then seeds the
    /// root row. A second startup against the same file leaves exactly one
    /// root row.
    ///
    /// # Arguments
    ///
    /// * `is_new_database` - Whether this is a newly created database file.
    ///   If true, performs a WAL checkpoint to flush the schema to disk
    ///   (prevents race conditions when tests swap database files rapidly).
    async fn initialize_schema(&self, is_new_database: bool) -> Result<(), DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        // Enable WAL mode for better concurrency
        self.execute_pragma(&conn, "PRAGMA journal_mode = WAL")
            .await?;

        // Make SQLite wait up to 5s instead of failing immediately on lock
        self.execute_pragma(&conn, "PRAGMA busy_timeout = 5000")
            .await?;

        // Enable foreign key constraints
        self.execute_pragma(&conn, "PRAGMA foreign_keys = ON")
            .await?;

        // Create nodes table (adjacency-list tree)
        conn.execute(
            "CREATE TABLE IF NOT EXISTS nodes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                label TEXT NOT NULL,
                parent_id INTEGER,
                FOREIGN KEY (parent_id) REFERENCES nodes(id)
            )",
            (),
        )
        .await
        .map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to create nodes table: {}", e))
        })?;

        // Index on parent_id (hierarchy queries)
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_nodes_parent ON nodes(parent_id)",
            (),
        )
        .await
        .map_err(|e| {
            DatabaseError::sql_execution(format!(
                "Failed to create index 'idx_nodes_parent': {}",
                e
            ))
        })?;

        // Seed the root row
        self.seed_root(&conn).await?;

        // Flush schema to disk for newly created databases. Rapid database
        // swaps in tests can otherwise hit "no such table" errors from WAL
        // entries that have not been checkpointed yet.
        if is_new_database {
            self.execute_pragma(&conn, "PRAGMA wal_checkpoint(TRUNCATE)")
                .await?;
        }

        Ok(())
    }

    /// Seed the root row if absent
    ///
    /// The root is the only node with a NULL parent. INSERT OR IGNORE keeps
    /// the operation idempotent across restarts.
    async fn seed_root(&self, conn: &libsql::Connection) -> Result<(), DatabaseError> {
        conn.execute(
            "INSERT OR IGNORE INTO nodes (id, label, parent_id) VALUES (?, ?, NULL)",
            (ROOT_NODE_ID, "Root"),
        )
        .await
        .map_err(|e| DatabaseError::sql_execution(format!("Failed to seed root node: {}", e)))?;

        Ok(())
    }

    /// Get a synchronous connection to the database
    ///
    /// Only use this in synchronous, single-threaded contexts. In async
    /// functions use `connect_with_timeout()` instead.
    pub fn connect(&self) -> Result<libsql::Connection, DatabaseError> {
        self.db.connect().map_err(DatabaseError::LibsqlError)
    }

    /// Get an async connection with busy timeout configured
    ///
    /// Sets a 5-second busy timeout so concurrent operations wait and retry
    /// instead of failing immediately when the database is locked. SQLite
    /// connections have thread-affinity requirements, and the Tokio runtime
    /// moves futures between threads at await points; the busy timeout makes
    /// interleaved operations serialize gracefully.
    pub async fn connect_with_timeout(&self) -> Result<libsql::Connection, DatabaseError> {
        let conn = self.connect()?;

        self.execute_pragma(&conn, "PRAGMA busy_timeout = 5000")
            .await?;

        Ok(conn)
    }

    //
    // NODE STORE OPERATIONS
    // These methods contain the raw SQL wrapped by the NodeStore trait
    // implementation. They carry no business rules: parent validation, root
    // protection, and subtree collection live in TreeService.
    //

    /// Insert a node and return its generated id
    ///
    /// # Arguments
    ///
    /// * `label` - Display text for the new node
    /// * `parent_id` - Id of the parent row. Existence is validated by the
    ///   service layer before this call.
    pub async fn db_insert_node(
        &self,
        label: &str,
        parent_id: i64,
    ) -> Result<i64, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        conn.execute(
            "INSERT INTO nodes (label, parent_id) VALUES (?, ?)",
            (label, parent_id),
        )
        .await
        .map_err(|e| DatabaseError::sql_execution(format!("Failed to insert node: {}", e)))?;

        Ok(conn.last_insert_rowid())
    }

    /// Retrieve a single node row by id
    ///
    /// # Returns
    ///
    /// * `Ok(Some(row))` - Node found, returns the libsql Row
    /// * `Ok(None)` - Node not found in database
    /// * `Err(DatabaseError)` - Query execution failed
    pub async fn db_get_node(&self, id: i64) -> Result<Option<libsql::Row>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        let mut stmt = conn
            .prepare("SELECT id, label, parent_id FROM nodes WHERE id = ?")
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to prepare get_node query: {}", e))
            })?;

        let mut rows = stmt.query([id]).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute get_node query: {}", e))
        })?;

        rows.next()
            .await
            .map_err(|e| DatabaseError::sql_execution(e.to_string()))
    }

    /// Retrieve every node row, ordered by id
    ///
    /// Callers derive the hierarchy from `parent_id`; id order keeps the
    /// listing stable across requests.
    pub async fn db_list_nodes(&self) -> Result<libsql::Rows, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        let mut stmt = conn
            .prepare("SELECT id, label, parent_id FROM nodes ORDER BY id")
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to prepare list_nodes query: {}", e))
            })?;

        stmt.query(()).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute list_nodes query: {}", e))
        })
    }

    /// Retrieve the direct children of a node, ordered by id
    pub async fn db_get_children(&self, parent_id: i64) -> Result<libsql::Rows, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        let mut stmt = conn
            .prepare("SELECT id, label, parent_id FROM nodes WHERE parent_id = ? ORDER BY id")
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!(
                    "Failed to prepare get_children query: {}",
                    e
                ))
            })?;

        stmt.query([parent_id]).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute get_children query: {}", e))
        })
    }

    /// Update a node's label
    ///
    /// # Returns
    ///
    /// Number of rows affected (0 = node didn't exist, 1 = updated)
    pub async fn db_update_label(&self, id: i64, label: &str) -> Result<u64, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        conn.execute("UPDATE nodes SET label = ? WHERE id = ?", (label, id))
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to update node label: {}", e))
            })
    }

    /// Update a node's parent pointer
    ///
    /// # Returns
    ///
    /// Number of rows affected (0 = node didn't exist, 1 = updated)
    pub async fn db_update_parent(
        &self,
        id: i64,
        new_parent_id: i64,
    ) -> Result<u64, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        conn.execute(
            "UPDATE nodes SET parent_id = ? WHERE id = ?",
            (new_parent_id, id),
        )
        .await
        .map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to update node parent: {}", e))
        })
    }

    /// Delete a batch of nodes in one statement
    ///
    /// A single `DELETE ... WHERE id IN (...)` is atomic, so a subtree passed
    /// here is removed all-or-nothing and no dangling parent reference can be
    /// observed. The service layer is responsible for passing the complete
    /// subtree id set.
    ///
    /// # Returns
    ///
    /// Number of rows removed.
    pub async fn db_delete_nodes(&self, ids: &[i64]) -> Result<u64, DatabaseError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let conn = self.connect_with_timeout().await?;

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("DELETE FROM nodes WHERE id IN ({})", placeholders);

        conn.execute(&sql, libsql::params_from_iter(ids.iter().copied()))
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to delete nodes: {}", e))
            })
    }

    /// Flush pending writes before shutdown
    pub async fn db_close(&self) -> Result<(), DatabaseError> {
        // Checkpoint WAL to ensure all writes are flushed. libsql handles
        // connection cleanup internally when handles are dropped.
        let conn = self.connect_with_timeout().await?;
        self.execute_pragma(&conn, "PRAGMA wal_checkpoint(TRUNCATE)")
            .await?;

        Ok(())
    }
}
