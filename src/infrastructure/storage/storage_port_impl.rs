use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use async_trait::async_trait;

use crate::application::ports::blob_store::{BlobStore, StoredBlob};
use crate::infrastructure::storage::{public_url, relative_from_public_url, safe_relative_path};

/// Stores objects as plain files under `uploads_root`; the HTTP layer serves
/// that directory at the path `public_base_url` points to.
pub struct FsBlobStore {
    pub uploads_root: PathBuf,
    pub public_base_url: String,
}

impl FsBlobStore {
    pub fn new(uploads_root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            uploads_root: uploads_root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    fn absolute(&self, relative: &str) -> anyhow::Result<PathBuf> {
        Ok(self.uploads_root.join(safe_relative_path(relative)?))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(
        &self,
        key: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<StoredBlob> {
        let path = self.absolute(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let size = bytes.len() as i64;
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(StoredBlob {
            key: key.to_string(),
            public_url: public_url(&self.public_base_url, key),
            size,
        })
    }

    async fn delete_by_url(&self, url: &str) -> anyhow::Result<()> {
        let relative = relative_from_public_url(&self.public_base_url, url)
            .ok_or_else(|| anyhow!("cannot derive file path from {url}"))?;
        let path = self.absolute(&relative)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "blob_already_absent");
                Ok(())
            }
            Err(err) => Err(err).with_context(|| format!("failed to remove {}", path.display())),
        }
    }
}
