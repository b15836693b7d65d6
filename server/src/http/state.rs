use std::sync::Arc;

use crate::blob::BlobStore;
use crate::store::TourStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub tours: Arc<dyn TourStore>,
    pub blobs: Arc<dyn BlobStore>,
}
