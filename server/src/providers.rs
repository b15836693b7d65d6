use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use object_store::aws::AmazonS3Builder;
use object_store::ObjectStore;
use tracing::{info, warn};

use crate::blob::{BlobStore, BucketBlobStore, DiskBlobStore};
use crate::config::{AppConfig, MediaMode, PersistenceMode};
use crate::store::{BucketStore, FileStore, MemoryStore, TourStore};

/// Which record-store implementation was selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedPersistence {
    Memory,
    File,
    Bucket,
}

/// Which blob-store implementation was selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedMedia {
    Disk,
    Bucket,
}

/// Concrete stores chosen once at startup and handed to the router.
pub struct Providers {
    pub tours: Arc<dyn TourStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub persistence: SelectedPersistence,
    pub media: SelectedMedia,
    /// When the disk blob store is selected, the directory the router serves
    /// under `/uploads`.
    pub serve_uploads_from: Option<PathBuf>,
}

/// Inspect the configuration and instantiate one record store and one blob
/// store. Pure with respect to process globals: everything is read from
/// `config`, so tests can drive the selection with synthetic values.
pub fn select_providers(config: &AppConfig) -> Result<Providers> {
    let (tours, persistence) = select_tour_store(config)?;
    let (blobs, media, serve_uploads_from) = select_blob_store(config)?;

    Ok(Providers {
        tours,
        blobs,
        persistence,
        media,
        serve_uploads_from,
    })
}

/// Capability probe: build the managed object-store client for a bucket.
///
/// Construction validates the connection settings without touching the
/// network; a failure here means the managed mode is not usable.
fn build_bucket_client(config: &AppConfig, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
    let settings = &config.bucket;

    let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
    if let Some(region) = &settings.region {
        builder = builder.with_region(region);
    }
    if let Some(endpoint) = &settings.endpoint {
        builder = builder.with_endpoint(endpoint);
    }
    if let Some(key) = &settings.access_key_id {
        builder = builder.with_access_key_id(key);
    }
    if let Some(secret) = &settings.secret_access_key {
        builder = builder.with_secret_access_key(secret);
    }
    if settings.allow_http {
        builder = builder.with_allow_http(true);
    }

    let store = builder
        .build()
        .with_context(|| format!("Failed to build client for bucket {bucket}"))?;
    Ok(Arc::new(store))
}

fn select_tour_store(config: &AppConfig) -> Result<(Arc<dyn TourStore>, SelectedPersistence)> {
    // An explicit override wins outright; forcing bucket mode with an
    // unusable bucket is a startup failure rather than a silent fallback.
    match config.persistence_mode {
        Some(PersistenceMode::Memory) => {
            info!("Persistence mode forced to memory");
            return Ok((Arc::new(MemoryStore::new()), SelectedPersistence::Memory));
        }
        Some(PersistenceMode::File) => return file_tour_store(config),
        Some(PersistenceMode::Bucket) => {
            let bucket = config
                .data_bucket
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("PERSISTENCE_MODE=bucket requires DATA_BUCKET"))?;
            let client = build_bucket_client(config, bucket)?;
            info!("Using bucket record store: {bucket}");
            return Ok((
                Arc::new(BucketStore::new(client)),
                SelectedPersistence::Bucket,
            ));
        }
        None => {}
    }

    if let Some(bucket) = config.data_bucket.as_deref() {
        match build_bucket_client(config, bucket) {
            Ok(client) => {
                info!("Using bucket record store: {bucket}");
                return Ok((
                    Arc::new(BucketStore::new(client)),
                    SelectedPersistence::Bucket,
                ));
            }
            Err(e) => warn!("Bucket record store unavailable, falling back: {e:#}"),
        }
    }

    if config.serverless {
        warn!("Serverless runtime detected; tours are held in memory and do not survive across invocations");
        return Ok((Arc::new(MemoryStore::new()), SelectedPersistence::Memory));
    }

    file_tour_store(config)
}

fn file_tour_store(config: &AppConfig) -> Result<(Arc<dyn TourStore>, SelectedPersistence)> {
    info!("Using file record store: {}", config.data_file.display());
    let store = FileStore::load(&config.data_file)?;
    Ok((Arc::new(store), SelectedPersistence::File))
}

type SelectedBlobStore = (Arc<dyn BlobStore>, SelectedMedia, Option<PathBuf>);

fn select_blob_store(config: &AppConfig) -> Result<SelectedBlobStore> {
    match config.media_mode {
        Some(MediaMode::Disk) => return disk_blob_store(config),
        Some(MediaMode::Bucket) => {
            let bucket = config
                .media_bucket
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("MEDIA_MODE=bucket requires MEDIA_BUCKET"))?;
            let client = build_bucket_client(config, bucket)?;
            info!("Using bucket blob store: {bucket}");
            let store = BucketBlobStore::new(client, bucket, &config.bucket);
            return Ok((Arc::new(store), SelectedMedia::Bucket, None));
        }
        None => {}
    }

    if let Some(bucket) = config.media_bucket.as_deref() {
        match build_bucket_client(config, bucket) {
            Ok(client) => {
                info!("Using bucket blob store: {bucket}");
                let store = BucketBlobStore::new(client, bucket, &config.bucket);
                return Ok((Arc::new(store), SelectedMedia::Bucket, None));
            }
            Err(e) => warn!("Bucket blob store unavailable, falling back: {e:#}"),
        }
    }

    disk_blob_store(config)
}

fn disk_blob_store(config: &AppConfig) -> Result<SelectedBlobStore> {
    info!("Storing uploads on disk: {}", config.uploads_dir.display());
    let store = DiskBlobStore::new(&config.uploads_dir, &config.public_base_url)?;
    Ok((
        Arc::new(store),
        SelectedMedia::Disk,
        Some(config.uploads_dir.clone()),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::config::BucketSettings;

    fn bucket_settings() -> BucketSettings {
        BucketSettings {
            region: Some("us-east-1".to_string()),
            endpoint: None,
            access_key_id: Some("test-key".to_string()),
            secret_access_key: Some("test-secret".to_string()),
            allow_http: false,
        }
    }

    #[test]
    fn defaults_to_file_and_disk() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::for_tests(dir.path());

        let providers = select_providers(&config).unwrap();
        assert_eq!(providers.persistence, SelectedPersistence::File);
        assert_eq!(providers.media, SelectedMedia::Disk);
        assert_eq!(
            providers.serve_uploads_from.as_deref(),
            Some(dir.path().join("uploads").as_path())
        );
    }

    #[test]
    fn serverless_runtime_falls_back_to_memory() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::for_tests(dir.path());
        config.serverless = true;

        let providers = select_providers(&config).unwrap();
        assert_eq!(providers.persistence, SelectedPersistence::Memory);
    }

    #[test]
    fn explicit_file_override_beats_serverless_detection() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::for_tests(dir.path());
        config.serverless = true;
        config.persistence_mode = Some(PersistenceMode::File);

        let providers = select_providers(&config).unwrap();
        assert_eq!(providers.persistence, SelectedPersistence::File);
    }

    #[test]
    fn data_bucket_enables_managed_persistence() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::for_tests(dir.path());
        config.data_bucket = Some("waymark-data".to_string());
        config.bucket = bucket_settings();

        let providers = select_providers(&config).unwrap();
        assert_eq!(providers.persistence, SelectedPersistence::Bucket);
        // Media stays on disk without its own bucket.
        assert_eq!(providers.media, SelectedMedia::Disk);
    }

    #[test]
    fn media_bucket_enables_managed_blob_storage() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::for_tests(dir.path());
        config.media_bucket = Some("waymark-media".to_string());
        config.bucket = bucket_settings();

        let providers = select_providers(&config).unwrap();
        assert_eq!(providers.media, SelectedMedia::Bucket);
        assert!(providers.serve_uploads_from.is_none());
    }

    #[test]
    fn forced_bucket_mode_without_bucket_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::for_tests(dir.path());
        config.persistence_mode = Some(PersistenceMode::Bucket);

        assert!(select_providers(&config).is_err());
    }

    #[test]
    fn forced_memory_mode_skips_the_disk() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::for_tests(dir.path());
        config.persistence_mode = Some(PersistenceMode::Memory);

        let providers = select_providers(&config).unwrap();
        assert_eq!(providers.persistence, SelectedPersistence::Memory);
        assert!(!config.data_file.exists());
    }
}
