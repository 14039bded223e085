//! HTTP error handling
//!
//! Converts service-layer errors into plain-text HTTP responses. The mapping
//! is one status per error variant: missing nodes are 404, a bad parent
//! reference on create (or a self-move) is 400, deleting the root is 422,
//! and storage failures are 500 with the detail kept out of the response.

use arbor_core::TreeServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Plain-text HTTP error response
#[derive(Debug)]
pub struct HttpError {
    /// Response status
    pub status: StatusCode,
    /// User-facing error message
    pub message: String,
}

impl HttpError {
    /// Create a new HTTP error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<TreeServiceError> for HttpError {
    fn from(err: TreeServiceError) -> Self {
        match err {
            TreeServiceError::NodeNotFound { .. } => {
                HttpError::new(StatusCode::NOT_FOUND, err.to_string())
            }
            TreeServiceError::InvalidParent { .. } => {
                HttpError::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            TreeServiceError::RootDeletionForbidden => {
                HttpError::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            TreeServiceError::Storage(source) => {
                // Log the detail, return a generic message
                error!("storage failure: {:#}", source);
                HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
