use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::StreamExt;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use shared_types::Tour;

use super::stamp_for_save;
use super::traits::TourStore;

/// Prefix acting as the tour document collection inside the bucket.
const COLLECTION: &str = "tours";

/// Record store keeping one JSON document per tour in a managed bucket.
///
/// `upsert` is a plain put on the document key: last write wins, no
/// optimistic concurrency check. `list_all` is a full collection scan; any
/// filtering happens client-side.
pub struct BucketStore {
    store: Arc<dyn ObjectStore>,
}

impl BucketStore {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    fn doc_path(id: &str) -> Path {
        Path::from(format!("{COLLECTION}/{id}.json"))
    }
}

#[async_trait]
impl TourStore for BucketStore {
    async fn list_all(&self) -> Result<Vec<Tour>> {
        let prefix = Path::from(COLLECTION);
        let mut stream = self.store.list(Some(&prefix));

        let mut tours = Vec::new();
        while let Some(meta) = stream.next().await.transpose()? {
            let result = self
                .store
                .get(&meta.location)
                .await
                .with_context(|| format!("Failed to read document {}", meta.location))?;
            let bytes = result.bytes().await?;
            tours.push(serde_json::from_slice(&bytes)?);
        }

        Ok(tours)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Tour>> {
        match self.store.get(&Self::doc_path(id)).await {
            Ok(result) => {
                let bytes = result.bytes().await?;
                Ok(Some(serde_json::from_slice(&bytes)?))
            }
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn upsert(&self, mut tour: Tour) -> Result<Tour> {
        stamp_for_save(&mut tour);

        let json = serde_json::to_vec_pretty(&tour)?;
        self.store
            .put(&Self::doc_path(&tour.id), PutPayload::from(json))
            .await
            .with_context(|| format!("Failed to write document for {}", tour.id))?;

        Ok(tour)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        match self.store.delete(&Self::doc_path(id)).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
