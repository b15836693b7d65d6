use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutPayload};

use crate::config::BucketSettings;

use super::traits::BlobStore;
use super::unique_key;

/// Key prefix for uploaded media objects inside the bucket.
const MEDIA_PREFIX: &str = "media";

/// Blob store writing each upload as a single non-resumable object creation
/// in a managed bucket.
///
/// The bucket must already allow public reads; access policy is not managed
/// here. The returned URL is the object's canonical public URL.
pub struct BucketBlobStore {
    store: Arc<dyn ObjectStore>,
    public_base: String,
}

impl BucketBlobStore {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: &str, settings: &BucketSettings) -> Self {
        let public_base = match &settings.endpoint {
            Some(endpoint) => format!("{}/{bucket}", endpoint.trim_end_matches('/')),
            None => match &settings.region {
                Some(region) => format!("https://{bucket}.s3.{region}.amazonaws.com"),
                None => format!("https://{bucket}.s3.amazonaws.com"),
            },
        };

        Self { store, public_base }
    }
}

#[async_trait]
impl BlobStore for BucketBlobStore {
    async fn store(
        &self,
        data: Bytes,
        original_filename: &str,
        content_type: &str,
    ) -> Result<String> {
        let key = unique_key(original_filename);
        let location = Path::from(format!("{MEDIA_PREFIX}/{key}"));

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        self.store
            .put_opts(&location, PutPayload::from_bytes(data), attributes.into())
            .await
            .with_context(|| format!("Failed to upload {location}"))?;

        Ok(format!("{}/{location}", self.public_base))
    }
}
