//! Arbor HTTP API
//!
//! This crate exposes the tree service as a REST API under `/api`:
//!
//! - `GET    /api/treeviews`          - full node list with droppable flags
//! - `GET    /api/treeviews/:id`      - single node
//! - `POST   /api/treeviews`          - create under an existing parent
//! - `PUT    /api/treeviews/:id`      - rename
//! - `DELETE /api/treeviews/:id`      - cascade delete (root is protected)
//! - `PUT    /api/treeviews/:id/move` - reparent
//! - `GET    /api/health`             - liveness probe
//!
//! The router is built separately from the binary so integration tests can
//! drive it in-process with `tower::ServiceExt::oneshot`.

use arbor_core::TreeService;
use axum::{
    http::{header, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;

mod http_error;
mod treeview_endpoints;

pub use http_error::HttpError;

/// Application state shared across all endpoints
#[derive(Clone)]
pub struct AppState {
    pub tree: Arc<TreeService>,
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(treeview_endpoints::routes(state))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Create the CORS layer for browser clients
///
/// Allows requests from the local dev-server origins by default. A custom
/// origin can be supplied via the CORS_ALLOW_ORIGIN environment variable.
fn cors_layer() -> CorsLayer {
    // Common local dev-server ports
    let default_origins = [
        "http://localhost:5173", // Vite default
        "http://localhost:3000", // same-origin fallback
    ];

    // Check for custom CORS origin from environment
    let origins: Vec<header::HeaderValue> =
        if let Ok(custom_origin) = std::env::var("CORS_ALLOW_ORIGIN") {
            custom_origin
                .split(',')
                .filter_map(|origin| origin.trim().parse::<header::HeaderValue>().ok())
                .collect()
        } else {
            default_origins
                .iter()
                .filter_map(|origin| origin.parse::<header::HeaderValue>().ok())
                .collect()
        };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(false)
}
