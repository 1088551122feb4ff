//! MCP server implementation
//!
//! The server registers one tool per catalog API route and delegates each
//! call to the tool group that owns it.

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};

use crate::client::ApiClient;

use super::tools::{
    DeleteProjectParams, GetImageParams, GetProjectParams, ImageTools, ProjectTools,
    SaveProjectParams, UpdateProjectParams, UploadImageParams,
};

/// Main MCP server coordinator
///
/// Holds no per-invocation state; every tool call is a single request to
/// the catalog API.
#[derive(Clone)]
pub struct McpServer {
    project_tools: ProjectTools,
    image_tools: ImageTools,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl McpServer {
    /// Create a new MCP server talking to the API behind `client`
    pub fn new(client: ApiClient) -> Self {
        Self {
            project_tools: ProjectTools::new(client.clone()),
            image_tools: ImageTools::new(client),
            tool_router: Self::tool_router(),
        }
    }

    /// Every registered tool with its input schema.
    pub fn tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    #[tool(
        description = "Create a project. All fields are required; the server assigns id, image and created_at."
    )]
    async fn save_project(
        &self,
        Parameters(params): Parameters<SaveProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        self.project_tools.save(params).await
    }

    #[tool(description = "List all projects in insertion order.")]
    async fn list_projects(&self) -> Result<CallToolResult, McpError> {
        self.project_tools.list().await
    }

    #[tool(description = "Get one project by id.")]
    async fn get_project(
        &self,
        Parameters(params): Parameters<GetProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        self.project_tools.get(params).await
    }

    #[tool(
        description = "Update a project. Only the supplied fields change; set image to a name returned by upload_project_image to attach it."
    )]
    async fn update_project(
        &self,
        Parameters(params): Parameters<UpdateProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        self.project_tools.update(params).await
    }

    #[tool(description = "Delete a project by id and return the removed record.")]
    async fn delete_project(
        &self,
        Parameters(params): Parameters<DeleteProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        self.project_tools.delete(params).await
    }

    #[tool(
        description = "Upload a png, jpg, jpeg or gif image (base64 data) for an existing project. Returns the stored file name; the project is not changed."
    )]
    async fn upload_project_image(
        &self,
        Parameters(params): Parameters<UploadImageParams>,
    ) -> Result<CallToolResult, McpError> {
        self.image_tools.upload(params).await
    }

    #[tool(description = "Fetch a stored image by file name. Returns base64 data with its mime type.")]
    async fn get_project_image(
        &self,
        Parameters(params): Parameters<GetImageParams>,
    ) -> Result<CallToolResult, McpError> {
        self.image_tools.get(params).await
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Catalog MCP Server - manage projects and their images through the catalog API"
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
