mod bucket;
mod disk;
mod traits;


pub use bucket::BucketBlobStore;
pub use disk::DiskBlobStore;
pub use traits::BlobStore;

use chrono::Utc;
use uuid::Uuid;

/// Path prefix under which disk uploads are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Generate a collision-free storage key for an upload, preserving the
/// original extension. Two uploads sharing an original filename never map to
/// the same key.
pub(crate) fn unique_key(original_filename: &str) -> String {
    let ext = std::path::Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    format!(
        "{}-{}{ext}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}
