//! MCP tool implementations
//!
//! Tool handlers are grouped by resource. Each group validates its
//! parameters, issues exactly one request through [`ApiClient`] and maps
//! the outcome into a `CallToolResult`.
//!
//! [`ApiClient`]: crate::client::ApiClient

mod images;
mod projects;


pub use images::{GetImageParams, ImageTools, UploadImageParams};
pub use projects::{
    DeleteProjectParams, GetProjectParams, ProjectTools, SaveProjectParams, UpdateProjectParams,
};

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde_json::Value;
use tracing::warn;

use crate::client::ClientResult;

/// Reject blank string parameters before any request is made.
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), McpError> {
    if value.trim().is_empty() {
        return Err(McpError::invalid_params(
            format!("'{field}' must not be empty"),
            None,
        ));
    }
    Ok(())
}

/// Render a JSON API result as a tool result.
///
/// Success bodies are pretty-printed into one text block; failures become a
/// single text block with the error flag set.
pub(crate) fn json_result(result: ClientResult<Value>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(body) => {
            let text = serde_json::to_string_pretty(&body)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Err(e) => Ok(error_result(e)),
    }
}

pub(crate) fn error_result(e: crate::client::ClientError) -> CallToolResult {
    warn!(error = %e, "Tool call failed");
    CallToolResult::error(vec![Content::text(e.to_string())])
}
