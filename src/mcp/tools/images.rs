//! Image tool implementations
//!
//! The only binary-aware tools. Payloads cross the MCP boundary as standard
//! base64.

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::multipart::{Form, Part};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::{error_result, json_result, require_non_empty};
use crate::client::ApiClient;

/// Multipart field the upload endpoint reads.
const UPLOAD_FIELD: &str = "file0";

/// Parameters for `upload_project_image`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UploadImageParams {
    /// Project id
    pub id: String,
    /// Original file name; its extension must be png, jpg, jpeg or gif
    pub filename: String,
    /// File content, standard base64
    pub data: String,
}

/// Parameters for `get_project_image`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetImageParams {
    /// Asset name returned by `upload_project_image`
    pub file: String,
}

/// Image upload and retrieval tools
#[derive(Clone)]
pub struct ImageTools {
    client: ApiClient,
}

impl ImageTools {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, params), fields(id = %params.id, filename = %params.filename))]
    pub async fn upload(&self, params: UploadImageParams) -> Result<CallToolResult, McpError> {
        require_non_empty("id", &params.id)?;
        require_non_empty("filename", &params.filename)?;
        let bytes = STANDARD.decode(params.data.trim()).map_err(|e| {
            McpError::invalid_params(format!("'data' is not valid base64: {e}"), None)
        })?;

        let form = Form::new().part(
            UPLOAD_FIELD,
            Part::bytes(bytes).file_name(params.filename.clone()),
        );
        let operation = format!("upload image for project with id {}", params.id);
        json_result(
            self.client
                .put_multipart(&operation, &["upload", params.id.as_str()], form)
                .await,
        )
    }

    #[instrument(skip(self))]
    pub async fn get(&self, params: GetImageParams) -> Result<CallToolResult, McpError> {
        require_non_empty("file", &params.file)?;

        let operation = format!("fetch image {}", params.file);
        match self.client.get_bytes(&operation, &["image", params.file.as_str()]).await {
            Ok(download) => Ok(CallToolResult::success(vec![Content::image(
                STANDARD.encode(&download.bytes),
                download.content_type,
            )])),
            Err(e) => Ok(error_result(e)),
        }
    }
}
