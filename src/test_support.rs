//! Shared fixtures for tests that talk to a live persistence service.

use tempfile::TempDir;
use tokio::net::TcpListener;

use crate::api::{API_PREFIX, AppState, create_router};
use crate::assets::FsAssetStore;
use crate::db::{Database, SqliteDatabase};

/// A persistence service bound to an ephemeral local port.
pub struct TestBackend {
    /// Base URL of the project resource, e.g. `http://127.0.0.1:PORT/api/project`.
    pub base_url: String,
    pub asset_dir: TempDir,
    server: tokio::task::JoinHandle<()>,
}

impl Drop for TestBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Install the rustls crypto provider reqwest needs. Safe to call repeatedly.
pub fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Start a backend with an in-memory store and a temporary asset directory.
pub async fn spawn_backend() -> TestBackend {
    init_crypto();

    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let asset_dir = TempDir::new().unwrap();
    let assets = FsAssetStore::new(asset_dir.path()).await.unwrap();
    let app = create_router(AppState::new(db, assets));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestBackend {
        base_url: format!("http://{addr}{API_PREFIX}"),
        asset_dir,
        server,
    }
}

/// A base URL nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}{API_PREFIX}")
}
