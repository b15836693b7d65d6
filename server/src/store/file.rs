use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use shared_types::Tour;
use tracing::warn;

use super::error::StoreError;
use super::memory::MemoryStore;
use super::traits::TourStore;

/// File-backed record store: an in-memory working set rewritten wholesale to
/// a pretty-printed JSON document after every successful mutation.
///
/// O(n) rewrite per mutation. Acceptable only at small scale.
pub struct FileStore {
    inner: MemoryStore,
    path: PathBuf,
}

impl FileStore {
    /// Load the working set from disk. A missing document starts empty; an
    /// unparsable one is discarded with a warning and also starts empty.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let tours = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Vec<Tour>>(&bytes) {
                Ok(tours) => tours,
                Err(e) => {
                    warn!("Discarding unparsable data file {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(StoreError::Unavailable(format!(
                    "Failed to read {}: {e}",
                    path.display()
                ))
                .into());
            }
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        Ok(Self {
            inner: MemoryStore::with_tours(tours),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self) -> Result<()> {
        let tours = self.inner.list_all().await?;
        let json = serde_json::to_vec_pretty(&tours)?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            StoreError::Unavailable(format!("Failed to write {}: {e}", self.path.display()))
        })?;
        Ok(())
    }
}

#[async_trait]
impl TourStore for FileStore {
    async fn list_all(&self) -> Result<Vec<Tour>> {
        self.inner.list_all().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Tour>> {
        self.inner.get_by_id(id).await
    }

    async fn upsert(&self, tour: Tour) -> Result<Tour> {
        let stored = self.inner.upsert(tour).await?;
        self.flush().await?;
        Ok(stored)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.inner.delete_by_id(id).await?;
        self.flush().await?;
        Ok(())
    }
}
