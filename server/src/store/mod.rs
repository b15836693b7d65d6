mod bucket;
mod error;
mod file;
mod memory;
mod traits;

#[cfg(test)]
mod tests;

pub use bucket::BucketStore;
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::TourStore;

use chrono::Utc;
use shared_types::Tour;

/// Assign an identifier and refresh timestamps before a record is written.
///
/// Identifiers are only generated here; once assigned they are immutable and
/// the sole lookup key.
pub(crate) fn stamp_for_save(tour: &mut Tour) {
    if tour.id.is_empty() {
        tour.id = format!("tour-{}", Utc::now().timestamp_millis());
    }
    let now = Utc::now();
    if tour.created_at.is_none() {
        tour.created_at = Some(now);
    }
    tour.updated_at = Some(now);
}
