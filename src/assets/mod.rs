//! Binary asset storage for project images.
//!
//! Assets are opaque blobs keyed by a generated file name. The store never
//! links an asset to a project; callers write the returned name into the
//! project's `image` field themselves.

mod error;
mod fs;


pub use error::{AssetError, AssetResult};
pub use fs::{FsAssetStore, MAX_NAME_BYTES};

use std::future::Future;

/// A stored asset read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub bytes: Vec<u8>,
    /// Media type guessed from the name's extension.
    pub content_type: String,
}

/// Storage for uploaded assets.
pub trait AssetStore: Send + Sync + 'static {
    /// Persist `bytes` under a newly generated name and return that name.
    ///
    /// Never overwrites an existing asset.
    fn put(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> impl Future<Output = AssetResult<String>> + Send;

    /// Read an asset by its generated name.
    fn get(&self, name: &str) -> impl Future<Output = AssetResult<Asset>> + Send;
}
