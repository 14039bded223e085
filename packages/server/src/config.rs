//! Server configuration
//!
//! All knobs come from environment variables with working defaults:
//!
//! - `PORT`      - listen port (default 3000)
//! - `ARBOR_DB`  - database file path (default `./data/arbor.db`)
//! - `CORS_ALLOW_ORIGIN` - comma-separated allowed origins (see `cors_layer`)

use std::path::PathBuf;

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Path to the database file
    pub db_path: PathBuf,
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(3000);

        let db_path = std::env::var("ARBOR_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/arbor.db"));

        Self { port, db_path }
    }

    /// Local bind address for the listener
    pub fn bind_addr(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}
