use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;

use super::traits::BlobStore;
use super::{unique_key, UPLOADS_PREFIX};

/// Blob store writing uploads into a local directory that the HTTP server
/// serves statically under [`UPLOADS_PREFIX`].
pub struct DiskBlobStore {
    uploads_dir: PathBuf,
    base_url: String,
}

impl DiskBlobStore {
    pub fn new(uploads_dir: impl Into<PathBuf>, public_base_url: &str) -> Result<Self> {
        let uploads_dir = uploads_dir.into();
        std::fs::create_dir_all(&uploads_dir)
            .with_context(|| format!("Failed to create {}", uploads_dir.display()))?;

        Ok(Self {
            uploads_dir,
            base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn uploads_dir(&self) -> &std::path::Path {
        &self.uploads_dir
    }
}

#[async_trait]
impl BlobStore for DiskBlobStore {
    async fn store(
        &self,
        data: Bytes,
        original_filename: &str,
        _content_type: &str,
    ) -> Result<String> {
        let key = unique_key(original_filename);
        let target = self.uploads_dir.join(&key);

        tokio::fs::write(&target, &data)
            .await
            .with_context(|| format!("Failed to write upload {}", target.display()))?;

        Ok(format!("{}{UPLOADS_PREFIX}/{key}", self.base_url))
    }
}
