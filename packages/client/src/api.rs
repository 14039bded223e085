//! API Transport
//!
//! Executes [`OutlineCommand`]s against the Arbor server. Failures are
//! logged and swallowed: the optimistic local state stays as it is and
//! diverges from the server until the next full reload.

use crate::model::{OutlineCommand, TreeItem};
use serde::Serialize;
use tracing::warn;

/// Body for POST /api/treeviews
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest<'a> {
    label: &'a str,
    parent_id: i64,
}

/// Body for PUT /api/treeviews/:id
#[derive(Serialize)]
struct RenameRequest<'a> {
    label: &'a str,
}

/// Body for PUT /api/treeviews/:id/move
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveRequest {
    new_parent_id: i64,
}

/// HTTP client for the treeview API
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (for example
    /// `http://localhost:3000/api`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the full node list
    pub async fn fetch_treeviews(&self) -> Result<Vec<TreeItem>, reqwest::Error> {
        self.http
            .get(format!("{}/treeviews", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Execute a command, returning the created node for `Create`
    pub async fn execute(
        &self,
        command: &OutlineCommand,
    ) -> Result<Option<TreeItem>, reqwest::Error> {
        match command {
            OutlineCommand::Create {
                label, parent_id, ..
            } => {
                let created = self
                    .http
                    .post(format!("{}/treeviews", self.base_url))
                    .json(&CreateRequest {
                        label,
                        parent_id: *parent_id,
                    })
                    .send()
                    .await?
                    .error_for_status()?
                    .json()
                    .await?;
                Ok(Some(created))
            }
            OutlineCommand::Rename { id, label } => {
                self.http
                    .put(format!("{}/treeviews/{}", self.base_url, id))
                    .json(&RenameRequest { label })
                    .send()
                    .await?
                    .error_for_status()?;
                Ok(None)
            }
            OutlineCommand::Delete { id } => {
                self.http
                    .delete(format!("{}/treeviews/{}", self.base_url, id))
                    .send()
                    .await?
                    .error_for_status()?;
                Ok(None)
            }
            OutlineCommand::Move { id, new_parent_id } => {
                self.http
                    .put(format!("{}/treeviews/{}/move", self.base_url, id))
                    .json(&MoveRequest {
                        new_parent_id: *new_parent_id,
                    })
                    .send()
                    .await?
                    .error_for_status()?;
                Ok(None)
            }
        }
    }

    /// Execute a command, logging any failure instead of surfacing it
    ///
    /// Returns the created node for `Create` commands so the caller can feed
    /// the assigned id back into the model.
    pub async fn dispatch(&self, command: &OutlineCommand) -> Option<TreeItem> {
        match self.execute(command).await {
            Ok(created) => created,
            Err(error) => {
                warn!(?command, "treeview request failed: {}", error);
                None
            }
        }
    }
}
