//! Filesystem-backed asset store.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use super::{Asset, AssetError, AssetResult, AssetStore};

/// Prefix shared by every generated asset name.
pub const ASSET_PREFIX: &str = "project";

/// Longest file name most filesystems accept, in bytes.
pub const MAX_NAME_BYTES: usize = 255;

/// Stores each asset as one file in a flat directory.
#[derive(Debug)]
pub struct FsAssetStore {
    dir: PathBuf,
    sequence: AtomicU64,
}

impl FsAssetStore {
    /// Open the store, creating `dir` if it does not exist.
    pub async fn new(dir: impl Into<PathBuf>) -> AssetResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|e| AssetError::Io {
            message: format!("Failed to create asset directory {}: {}", dir.display(), e),
        })?;
        info!(dir = %dir.display(), "Asset store ready");

        Ok(Self {
            dir,
            sequence: AtomicU64::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Build `project-<millis>-<seq>-<sanitized original>`.
    ///
    /// The sequence keeps names unique when two uploads share a millisecond
    /// and an original name. Long originals are shortened so the whole name
    /// fits in [`MAX_NAME_BYTES`].
    fn generate_name(&self, original_name: &str) -> String {
        let millis = Utc::now().timestamp_millis();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let prefix = format!("{ASSET_PREFIX}-{millis}-{seq}-");

        let sanitized = sanitize_filename::sanitize_with_options(
            original_name.trim(),
            sanitize_filename::Options {
                truncate: false,
                ..Default::default()
            },
        );
        let base = if sanitized.is_empty() {
            "upload"
        } else {
            sanitized.as_str()
        };

        let budget = MAX_NAME_BYTES.saturating_sub(prefix.len());
        format!("{prefix}{}", shorten_keeping_extension(base, budget))
    }
}

/// Cut `name` to at most `max` bytes on a char boundary, keeping its
/// extension when the extension itself fits.
fn shorten_keeping_extension(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_string();
    }

    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.len() + 1 < max);

    match extension {
        Some(ext) => {
            let stem = &name[..name.len() - ext.len() - 1];
            format!("{}.{}", floor_to_char_boundary(stem, max - ext.len() - 1), ext)
        }
        None => floor_to_char_boundary(name, max).to_string(),
    }
}

fn floor_to_char_boundary(s: &str, max: usize) -> &str {
    let mut end = max.min(s.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Write `bytes` to a freshly created file, removing it if the write fails
/// so no partial asset is left behind under a name nobody received.
pub(super) async fn write_or_discard<W>(mut file: W, path: &Path, bytes: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        file.write_all(bytes).await?;
        file.flush().await
    }
    .await;

    if written.is_err() {
        drop(file);
        if let Err(e) = fs::remove_file(path).await {
            warn!(path = %path.display(), error = %e, "Failed to remove partial asset");
        }
    }
    written
}

/// Accept only names that cannot escape the asset directory.
fn validate_name(name: &str) -> AssetResult<()> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && sanitize_filename::sanitize(name) == name;

    if plain {
        Ok(())
    } else {
        Err(AssetError::InvalidName {
            name: name.to_string(),
        })
    }
}

impl AssetStore for FsAssetStore {
    async fn put(&self, original_name: &str, bytes: &[u8]) -> AssetResult<String> {
        let name = self.generate_name(original_name);
        let path = self.dir.join(&name);

        let io_err = |e: io::Error| AssetError::Io {
            message: format!("Failed to write {}: {}", path.display(), e),
        };

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(io_err)?;
        write_or_discard(file, &path, bytes).await.map_err(io_err)?;

        debug!(name = %name, size = bytes.len(), "Stored asset");
        Ok(name)
    }

    async fn get(&self, name: &str) -> AssetResult<Asset> {
        validate_name(name)?;

        let bytes = fs::read(self.dir.join(name))
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AssetError::NotFound {
                    name: name.to_string(),
                },
                _ => AssetError::Io {
                    message: format!("Failed to read asset '{}': {}", name, e),
                },
            })?;

        let content_type = mime_guess::from_path(name)
            .first_or_octet_stream()
            .to_string();

        Ok(Asset {
            name: name.to_string(),
            bytes,
            content_type,
        })
    }
}
