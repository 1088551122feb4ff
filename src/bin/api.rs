//! Catalog API server binary.
//!
//! This binary creates the concrete store implementations and passes them
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use catalog::api::{self, ApiError, Config, DEFAULT_PORT};
use catalog::assets::{AssetError, FsAssetStore};
use catalog::config::{BackendConfig, ConfigError, load_env_file};
use catalog::db::{Database, DbError, SqliteDatabase};
use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(catalog::binary::config))]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    #[diagnostic(code(catalog::binary::database))]
    Database(#[from] DbError),

    #[error("Asset store error: {0}")]
    #[diagnostic(code(catalog::binary::assets))]
    Assets(#[from] AssetError),

    #[error("API server error: {0}")]
    #[diagnostic(code(catalog::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "catalog-api")]
#[command(author, version, about = "Catalog API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Dotenv file to load before reading configuration (defaults to ./.env if present)
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    api::init_tracing();
    serve(cli).await?;
    Ok(())
}

async fn serve(cli: Cli) -> Result<(), BinaryError> {
    load_env_file(cli.env_file.as_deref())?;
    let config = BackendConfig::from_env()?;

    let db = SqliteDatabase::connect(&config.store).await?;

    // Run migrations before starting the server
    db.migrate().await?;
    info!("Database migrations complete");

    let assets = FsAssetStore::new(&config.asset_dir).await?;

    api::run(
        Config {
            host: cli.host,
            port: cli.port,
        },
        db,
        assets,
    )
    .await?;

    Ok(())
}
