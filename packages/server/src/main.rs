//! Arbor HTTP server binary
//!
//! Opens (or creates) the database, seeds the root row, and serves the
//! `/api/treeviews` REST surface.

use arbor_core::db::{DatabaseService, NodeStore, TursoStore};
use arbor_core::services::TreeService;
use arbor_server::config::ServerConfig;
use arbor_server::{create_router, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arbor_server=debug,arbor_core=debug,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    info!(db_path = %config.db_path.display(), "opening database");

    let db = Arc::new(DatabaseService::new(config.db_path.clone()).await?);
    let store: Arc<dyn NodeStore> = Arc::new(TursoStore::new(db));
    let tree = Arc::new(TreeService::new(store));

    let app = create_router(AppState { tree });

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
