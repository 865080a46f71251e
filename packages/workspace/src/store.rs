//! # Asset Store
//!
//! Holds the last committed set of preview fragments and answers reads by
//! logical asset path, falling back to the compiled-in defaults for any
//! fragment that was never committed.
//!
//! The current state is one immutable [`Snapshot`] behind an `Arc`. A commit
//! builds the next snapshot, persists it through the backend, and only then
//! swaps the pointer, so a reader holds either the old or the new snapshot
//! and never a mix of the two.

use crate::backend::{AssetBackend, MemoryBackend};
use codepad_common::{default_content, Fragment, FragmentSet};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Corrupt snapshot at {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("Backend error: {0}")]
    Backend(String),
}

/// One committed fragment set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Starts at 1 and grows by one per commit
    pub revision: u64,
    pub fragments: FragmentSet,
}

/// Where an asset's content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOrigin {
    Committed { revision: u64 },
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub path: &'static str,
    pub content: String,
    pub content_type: &'static str,
    pub origin: AssetOrigin,
}

impl Asset {
    fn resolve(snapshot: Option<&Snapshot>, fragment: Fragment) -> Self {
        let (content, origin) = match snapshot {
            Some(snapshot) => (
                snapshot.fragments.get(fragment).to_string(),
                AssetOrigin::Committed {
                    revision: snapshot.revision,
                },
            ),
            None => (default_content(fragment).to_string(), AssetOrigin::Default),
        };

        Self {
            path: fragment.asset_path(),
            content,
            content_type: fragment.content_type(),
            origin,
        }
    }
}

pub struct AssetStore {
    current: RwLock<Option<Arc<Snapshot>>>,
    /// Serialises commits across the backend write
    commit_gate: Mutex<()>,
    backend: Box<dyn AssetBackend>,
}

impl AssetStore {
    /// Empty store with nothing persisted
    pub fn in_memory() -> Self {
        Self::with_snapshot(Box::new(MemoryBackend), None)
    }

    /// Open a store over `backend`, starting from whatever it last persisted.
    ///
    /// A snapshot that cannot be read is logged and the store starts empty.
    pub async fn open(backend: Box<dyn AssetBackend>) -> Self {
        let snapshot = match backend.load().await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "Ignoring unreadable snapshot, starting from defaults");
                None
            }
        };

        if let Some(snapshot) = &snapshot {
            info!(revision = snapshot.revision, "Restored preview snapshot");
        }

        Self::with_snapshot(backend, snapshot)
    }

    fn with_snapshot(backend: Box<dyn AssetBackend>, snapshot: Option<Snapshot>) -> Self {
        Self {
            current: RwLock::new(snapshot.map(Arc::new)),
            commit_gate: Mutex::new(()),
            backend,
        }
    }

    /// The snapshot readers currently see
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Asset stored under `path`, or the default for that path when nothing
    /// was committed. `None` only for paths outside the preview layout.
    pub async fn get(&self, path: &str) -> Option<Asset> {
        let fragment = Fragment::from_asset_path(path)?;
        Some(self.resolve(fragment).await)
    }

    pub async fn resolve(&self, fragment: Fragment) -> Asset {
        Asset::resolve(self.snapshot().as_deref(), fragment)
    }

    /// All three fragments, resolved from a single snapshot
    pub async fn resolve_all(&self) -> FragmentSet {
        let snapshot = self.snapshot();
        let mut set = FragmentSet::default();
        for fragment in Fragment::ALL {
            set.set(fragment, Asset::resolve(snapshot.as_deref(), fragment).content);
        }
        set
    }

    /// Store all three fragments as one unit.
    ///
    /// Concurrent commits queue on the gate. If the backend fails the store
    /// keeps its previous snapshot.
    pub async fn commit(&self, fragments: FragmentSet) -> Result<Arc<Snapshot>, StoreError> {
        let _gate = self.commit_gate.lock().await;

        let snapshot = Snapshot {
            revision: self.revision() + 1,
            fragments,
        };
        self.backend.persist(&snapshot).await?;

        let snapshot = Arc::new(snapshot);
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&snapshot));

        info!(revision = snapshot.revision, "Committed preview fragments");
        Ok(snapshot)
    }

    /// Last committed fragments, if any commit exists
    pub fn committed(&self) -> Option<FragmentSet> {
        self.snapshot().map(|s| s.fragments.clone())
    }

    /// Revision of the current snapshot, 0 before the first commit
    pub fn revision(&self) -> u64 {
        self.snapshot().map_or(0, |s| s.revision)
    }
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
