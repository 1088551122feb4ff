//! Application state for the API server.

use std::sync::Arc;

use crate::assets::AssetStore;
use crate::db::Database;

/// Shared application state.
///
/// Holds the process-wide project store and asset store. Generic over both
/// so tests can inject in-memory or failing implementations.
pub struct AppState<D: Database, A: AssetStore> {
    db: Arc<D>,
    assets: Arc<A>,
}

// Manual Clone impl - only the Arcs are cloned, D and A need not be Clone
impl<D: Database, A: AssetStore> Clone for AppState<D, A> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            assets: Arc::clone(&self.assets),
        }
    }
}

impl<D: Database, A: AssetStore> AppState<D, A> {
    /// Create a new AppState from an already connected store and asset store.
    pub fn new(db: D, assets: A) -> Self {
        Self {
            db: Arc::new(db),
            assets: Arc::new(assets),
        }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Get a reference to the asset store.
    pub fn assets(&self) -> &A {
        &self.assets
    }
}
