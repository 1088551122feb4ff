//! HTTP persistence service for projects and their images.
//!
//! The service is generic over the project store and the asset store; the
//! binary picks the concrete implementations and hands them to [`run`].

mod error;
pub mod handlers;
pub mod routes;
mod state;

use std::net::{IpAddr, Ipv4Addr};

use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{ApiError, ApiResult, STORE_FAULT_MESSAGE};
pub use routes::{API_PREFIX, create_router};
pub use state::AppState;

use crate::assets::AssetStore;
use crate::db::Database;

/// Port the service listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 3977;

/// API server configuration
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the API server until interrupted.
///
/// In-flight requests are drained before the store connections are closed.
pub async fn run<D: Database, A: AssetStore>(config: Config, db: D, assets: A) -> ApiResult<()> {
    let state = AppState::new(db, assets);
    let app = create_router(state.clone()).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ApiError::Serve)?;

    state.db().close().await;
    info!("Store connections closed");
    Ok(())
}
