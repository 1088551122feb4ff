//! MCP Streamable HTTP service creation
//!
//! This module provides the MCP service that can be nested into an Axum
//! router when the gateway runs over HTTP instead of stdio.

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};

use crate::client::ApiClient;

use super::server::McpServer;

/// Path the MCP service is mounted at.
pub const MCP_PATH: &str = "/mcp";

/// Create MCP Streamable HTTP service
///
/// Each session gets its own [`McpServer`]; they share the client's
/// connection pool.
///
/// # Example
/// ```no_run
/// use axum::Router;
/// # use catalog::client::{ApiClient, DEFAULT_TIMEOUT};
/// # use catalog::mcp::create_mcp_service;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(None, DEFAULT_TIMEOUT)?;
/// let app: Router = Router::new().nest_service("/mcp", create_mcp_service(client));
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service(client: ApiClient) -> StreamableHttpService<McpServer> {
    // Returns io::Error to match rmcp's expected factory signature
    let service_factory =
        move || -> Result<McpServer, std::io::Error> { Ok(McpServer::new(client.clone())) };

    let config = StreamableHttpServerConfig {
        stateful_mode: true,
        ..Default::default()
    };

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
