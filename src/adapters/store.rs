use crate::domain::ports::BlobStore;
use crate::utils::error::StoreError;
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;

/// Persists the watermark blob in a single file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BlobStore for FileStore {
    async fn load(&self) -> Result<Vec<u8>, StoreError> {
        match fs::read(&self.path) {
            Ok(data) => Ok(data),
            // A file that does not exist yet reads as an empty blob.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Unavailable(e.to_string())),
        }
    }

    async fn save(&self, blob: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Unavailable(e.to_string()))?;
            }
        }
        fs::write(&self.path, blob).map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}
