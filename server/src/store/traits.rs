use anyhow::Result;
use async_trait::async_trait;
use shared_types::Tour;

/// Persistence abstraction for tour aggregates.
///
/// All implementations share the same contract: `get_by_id` distinguishes
/// "not found" (`None`) from an underlying fault, `upsert` inserts or
/// replaces by identifier, and `delete_by_id` is idempotent.
#[async_trait]
pub trait TourStore: Send + Sync {
    /// Return the complete working set. No pagination.
    async fn list_all(&self) -> Result<Vec<Tour>>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Tour>>;

    /// Insert or replace the record, generating an identifier if the caller
    /// omitted one. Returns the record as stored.
    async fn upsert(&self, tour: Tour) -> Result<Tour>;

    /// Remove the record. Deleting an absent identifier is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<()>;
}
