//! Catalog MCP gateway binary.
//!
//! Serves the catalog tools over stdio (default) or Streamable HTTP. Logs go
//! to stderr because stdout carries the stdio protocol.

use std::net::IpAddr;
use std::time::Duration;

use axum::Router;
use catalog::client::{ApiClient, ClientError};
use catalog::config::{ConfigError, load_env_file};
use catalog::mcp::{MCP_PATH, McpServer, create_mcp_service};
use clap::{Parser, ValueEnum};
use miette::Diagnostic;
use rmcp::ServiceExt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(catalog::binary::config))]
    Config(#[from] ConfigError),

    #[error("API client error: {0}")]
    #[diagnostic(code(catalog::binary::client))]
    Client(#[from] ClientError),

    #[error("MCP transport error: {0}")]
    #[diagnostic(code(catalog::binary::transport))]
    Transport(String),

    #[error("Failed to bind {addr}")]
    #[diagnostic(code(catalog::binary::bind))]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    Stdio,
    Http,
}

#[derive(Parser)]
#[command(name = "catalog-mcp")]
#[command(author, version, about = "Catalog MCP gateway", long_about = None)]
struct Cli {
    /// Base URL of the catalog API (defaults to CATALOG_API_URL, then http://localhost:3977/api/project)
    #[arg(long)]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// MCP transport
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Host address to bind to (http transport)
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on (http transport)
    #[arg(short, long, default_value_t = 3978)]
    port: u16,
}

/// Initialize tracing subscriber writing to stderr
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog=debug,rmcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // reqwest is built without a bundled crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    serve(cli).await?;
    Ok(())
}

async fn serve(cli: Cli) -> Result<(), BinaryError> {
    load_env_file(None)?;
    let client = ApiClient::new(cli.api_url, Duration::from_secs(cli.timeout_secs))?;
    info!(api_url = client.base_url(), "Forwarding tool calls");

    match cli.transport {
        Transport::Stdio => serve_stdio(client).await,
        Transport::Http => serve_http(client, cli.host, cli.port).await,
    }
}

async fn serve_stdio(client: ApiClient) -> Result<(), BinaryError> {
    let server = McpServer::new(client);
    info!(tools = server.tools().len(), "Ready - communicating via stdin/stdout");

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| BinaryError::Transport(e.to_string()))?;

    service
        .waiting()
        .await
        .map_err(|e| BinaryError::Transport(e.to_string()))?;

    info!("STDIO transport finished");
    Ok(())
}

async fn serve_http(client: ApiClient, host: IpAddr, port: u16) -> Result<(), BinaryError> {
    let app = Router::new()
        .nest_service(MCP_PATH, create_mcp_service(client))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| BinaryError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("MCP server listening on http://{}{}", addr, MCP_PATH);

    let ct = CancellationToken::new();
    let shutdown = ct.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            shutdown.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(ct.cancelled_owned())
        .await
        .map_err(|e| BinaryError::Transport(e.to_string()))?;

    Ok(())
}
