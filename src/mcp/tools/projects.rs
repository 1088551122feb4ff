//! Project tool implementations

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{json_result, require_non_empty};
use crate::client::ApiClient;

/// Parameters for `save_project`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SaveProjectParams {
    /// Project name
    pub name: String,
    /// Short description
    pub description: String,
    /// Category label, e.g. "web"
    pub category: String,
    /// Year the project started
    pub year: i32,
    /// Status label, e.g. "active" or "archived"
    pub state: String,
}

/// Parameters for `get_project`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProjectParams {
    /// Project id
    pub id: String,
}

/// Parameters for `delete_project`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteProjectParams {
    /// Project id
    pub id: String,
}

/// Parameters for `update_project`.
///
/// Only supplied fields are sent; omitted fields keep their stored value.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateProjectParams {
    /// Project id
    #[serde(skip_serializing)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Image asset name as returned by `upload_project_image`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Project management tools
#[derive(Clone)]
pub struct ProjectTools {
    client: ApiClient,
}

impl ProjectTools {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn save(&self, params: SaveProjectParams) -> Result<CallToolResult, McpError> {
        require_non_empty("name", &params.name)?;
        require_non_empty("description", &params.description)?;
        require_non_empty("category", &params.category)?;
        require_non_empty("state", &params.state)?;

        let operation = format!("save project '{}'", params.name);
        json_result(self.client.post_json(&operation, &["save"], &params).await)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<CallToolResult, McpError> {
        json_result(self.client.get_json("list projects", &["list"]).await)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, params: GetProjectParams) -> Result<CallToolResult, McpError> {
        require_non_empty("id", &params.id)?;

        let operation = format!("get project with id {}", params.id);
        json_result(self.client.get_json(&operation, &["item", params.id.as_str()]).await)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, params: UpdateProjectParams) -> Result<CallToolResult, McpError> {
        require_non_empty("id", &params.id)?;

        let operation = format!("update project with id {}", params.id);
        json_result(
            self.client
                .put_json(&operation, &["update", params.id.as_str()], &params)
                .await,
        )
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, params: DeleteProjectParams) -> Result<CallToolResult, McpError> {
        require_non_empty("id", &params.id)?;

        let operation = format!("delete project with id {}", params.id);
        json_result(
            self.client
                .delete_json(&operation, &["delete", params.id.as_str()])
                .await,
        )
    }
}
