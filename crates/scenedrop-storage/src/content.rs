use crate::error::{StorageError, StorageResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// The content directory holding artifact files.
///
/// Filenames are generated server-side (`<code>_<timestamp>.<ext>`), but
/// names are validated anyway so the store can never be talked into
/// touching a path outside its base directory.
pub struct ContentStore {
    base_path: PathBuf,
    base_url: String,
}

impl ContentStore {
    /// Create a new ContentStore, creating the directory if needed.
    ///
    /// # Arguments
    /// * `base_path` - Content directory (e.g., "uploads")
    /// * `base_url` - URL base for served artifacts (e.g., "http://localhost:8088/artifacts")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::Config(format!(
                "Failed to create content directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(ContentStore {
            base_path,
            base_url,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Public URL for a stored filename.
    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), file_name)
    }

    /// Resolve a filename inside the content directory, rejecting anything
    /// that is not a bare file name.
    fn file_path(&self, file_name: &str) -> StorageResult<PathBuf> {
        if file_name.is_empty()
            || file_name.contains("..")
            || file_name.contains('/')
            || file_name.contains('\\')
        {
            return Err(StorageError::InvalidName(
                "Artifact names must be bare file names".to_string(),
            ));
        }
        Ok(self.base_path.join(file_name))
    }

    /// Write an artifact and return its public URL.
    pub async fn store(&self, file_name: &str, data: &[u8]) -> StorageResult<String> {
        let path = self.file_path(file_name)?;
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Artifact write successful"
        );

        Ok(self.url_for(file_name))
    }

    /// Delete an artifact. A file that is already gone is not an error.
    pub async fn delete(&self, file_name: &str) -> StorageResult<()> {
        let path = self.file_path(file_name)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), "Artifact delete successful");

        Ok(())
    }

    pub async fn exists(&self, file_name: &str) -> StorageResult<bool> {
        let path = self.file_path(file_name)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }
}
