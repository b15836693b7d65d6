use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Persistence abstraction for uploaded media.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write the fully buffered upload under a freshly generated key and
    /// return a URL a client can fetch without further authentication.
    ///
    /// The call runs to completion or fails; partial objects are not cleaned
    /// up.
    async fn store(
        &self,
        data: Bytes,
        original_filename: &str,
        content_type: &str,
    ) -> Result<String>;
}
