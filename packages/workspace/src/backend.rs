//! Where committed snapshots live between process restarts.

use crate::store::{Snapshot, StoreError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SNAPSHOT_FILE_NAME: &str = "preview.json";

/// Durable storage for the latest snapshot.
///
/// `persist` must either replace the previous snapshot completely or leave it
/// untouched.
#[async_trait]
pub trait AssetBackend: Send + Sync {
    /// Latest persisted snapshot, `None` when nothing was ever written
    async fn load(&self) -> Result<Option<Snapshot>, StoreError>;

    async fn persist(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// Keeps nothing; the store's in-memory view is the only copy
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryBackend;

#[async_trait]
impl AssetBackend for MemoryBackend {
    async fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(None)
    }

    async fn persist(&self, _snapshot: &Snapshot) -> Result<(), StoreError> {
        Ok(())
    }
}

/// One JSON snapshot file inside a directory
#[derive(Debug, Clone)]
pub struct DirectoryBackend {
    dir: PathBuf,
}

impl DirectoryBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE_NAME)
    }
}

#[async_trait]
impl AssetBackend for DirectoryBackend {
    async fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let path = self.snapshot_path();
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let snapshot = serde_json::from_str(&json).map_err(|e| StoreError::Corrupt {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(Some(snapshot))
    }

    async fn persist(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.snapshot_path();
        let temp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(snapshot)?;

        // Rename is the single step that makes the new snapshot visible
        tokio::fs::write(&temp_path, json).await?;
        tokio::fs::rename(&temp_path, &path).await?;

        debug!(revision = snapshot.revision, path = %path.display(), "Persisted snapshot");
        Ok(())
    }
}
