use anyhow::Result;
use async_trait::async_trait;
use shared_types::Tour;
use tokio::sync::RwLock;

use super::stamp_for_save;
use super::traits::TourStore;

/// Record store backed by an ordered sequence in process memory.
///
/// Lifetime is the process lifetime; the working set is cleared on restart.
/// Used when no durable backend is configured or the runtime is known to be
/// stateless per invocation.
#[derive(Default)]
pub struct MemoryStore {
    tours: RwLock<Vec<Tour>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tours(tours: Vec<Tour>) -> Self {
        Self {
            tours: RwLock::new(tours),
        }
    }
}

#[async_trait]
impl TourStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Tour>> {
        Ok(self.tours.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Tour>> {
        Ok(self.tours.read().await.iter().find(|t| t.id == id).cloned())
    }

    async fn upsert(&self, mut tour: Tour) -> Result<Tour> {
        stamp_for_save(&mut tour);

        let mut tours = self.tours.write().await;
        match tours.iter_mut().find(|t| t.id == tour.id) {
            Some(existing) => *existing = tour.clone(),
            None => tours.push(tour.clone()),
        }

        Ok(tour)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.tours.write().await.retain(|t| t.id != id);
        Ok(())
    }
}
