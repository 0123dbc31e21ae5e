use crate::error::{StorageError, StorageResult};
use scenedrop_core::models::ArtifactEntry;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, MutexGuard};

/// Manifest filename inside the content directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// The JSON catalog of stored artifacts.
///
/// Reads are tolerant by policy: a missing, empty, or unreadable manifest
/// is an empty catalog, never an error. Writes go through a temp file and
/// an atomic rename, so readers never observe a half-written document.
///
/// Every read-modify-write cycle (upload append, retention sweep) must run
/// under the store's guard — two concurrent load/save cycles would
/// otherwise silently drop one writer's entries, whole-document
/// last-write-wins.
pub struct ManifestStore {
    path: PathBuf,
    lock: Mutex<()>,
}

/// Proof that the manifest mutex is held; scopes load+save cycles.
pub struct ManifestGuard<'a> {
    store: &'a ManifestStore,
    _permit: MutexGuard<'a, ()>,
}

impl ManifestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ManifestStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Acquire the manifest for a read-modify-write cycle.
    pub async fn lock(&self) -> ManifestGuard<'_> {
        ManifestGuard {
            store: self,
            _permit: self.lock.lock().await,
        }
    }

    /// Tolerant read of the catalog.
    ///
    /// Safe without the guard: saves are atomic renames, so a plain reader
    /// sees either the previous or the new complete document.
    pub async fn load(&self) -> Vec<ArtifactEntry> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Vec::new();
        }

        match serde_json::from_slice(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Ignoring unreadable manifest; treating catalog as empty"
                );
                Vec::new()
            }
        }
    }

    async fn save_unlocked(&self, entries: &[ArtifactEntry]) -> StorageResult<()> {
        let json = serde_json::to_vec_pretty(entries).map_err(|e| {
            StorageError::WriteFailed(format!("Failed to serialize manifest: {}", e))
        })?;

        let tmp = self.path.with_extension("json.tmp");

        let mut file = fs::File::create(&tmp).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create {}: {}", tmp.display(), e))
        })?;
        file.write_all(&json).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync {}: {}", tmp.display(), e))
        })?;

        fs::rename(&tmp, &self.path).await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to move manifest into place at {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

impl ManifestGuard<'_> {
    pub async fn load(&self) -> Vec<ArtifactEntry> {
        self.store.load().await
    }

    /// Replace the whole catalog.
    pub async fn save(&self, entries: &[ArtifactEntry]) -> StorageResult<()> {
        self.store.save_unlocked(entries).await
    }
}
