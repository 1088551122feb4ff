//! Model Context Protocol (MCP) gateway
//!
//! Exposes each catalog API route as an MCP tool. Tools translate their
//! parameters into one HTTP request and the response back into MCP content
//! blocks.
//!
//! # Architecture
//!
//! - **server**: Main MCP server coordinator and tool registration
//! - **service**: Streamable HTTP transport wiring
//! - **tools**: Tool groups per resource
//!   - ProjectTools: project CRUD
//!   - ImageTools: image upload and retrieval

pub mod server;
mod service;
pub mod tools;


pub use server::McpServer;
pub use service::{MCP_PATH, create_mcp_service};
