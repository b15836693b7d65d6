use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;

/// Explicit persistence-mode override. Absent means "detect from environment".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    Memory,
    File,
    Bucket,
}

/// Explicit media-storage override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaMode {
    Disk,
    Bucket,
}

/// Connection settings for the managed object store.
///
/// Credentials may also come from the standard AWS environment variables;
/// these fields only carry explicit overrides.
#[derive(Debug, Clone, Default)]
pub struct BucketSettings {
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub allow_http: bool,
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: SocketAddr,
    /// Base URL prepended to disk-upload paths when building public URLs.
    pub public_base_url: String,
    /// JSON document holding the file-backed working set.
    pub data_file: PathBuf,
    /// Directory for disk-stored uploads, served at `/uploads`.
    pub uploads_dir: PathBuf,
    pub persistence_mode: Option<PersistenceMode>,
    pub media_mode: Option<MediaMode>,
    /// Bucket holding tour documents; presence enables managed persistence.
    pub data_bucket: Option<String>,
    /// Bucket holding uploaded media; presence enables managed blob storage.
    pub media_bucket: Option<String>,
    pub bucket: BucketSettings,
    /// Stateless runtime detected; disk writes there are unreliable.
    pub serverless: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_address = std::env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()?;

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let data_file = std::env::var("DATA_FILE")
            .unwrap_or_else(|_| "./data/tours.json".to_string())
            .into();
        let uploads_dir = std::env::var("UPLOADS_DIR")
            .unwrap_or_else(|_| "./data/uploads".to_string())
            .into();

        let persistence_mode = match std::env::var("PERSISTENCE_MODE").ok().as_deref() {
            None => None,
            Some("memory") => Some(PersistenceMode::Memory),
            Some("file") => Some(PersistenceMode::File),
            Some("bucket") => Some(PersistenceMode::Bucket),
            Some(other) => anyhow::bail!(
                "Unknown PERSISTENCE_MODE: {other}. Must be 'memory', 'file' or 'bucket'"
            ),
        };

        let media_mode = match std::env::var("MEDIA_MODE").ok().as_deref() {
            None => None,
            Some("disk") => Some(MediaMode::Disk),
            Some("bucket") => Some(MediaMode::Bucket),
            Some(other) => {
                anyhow::bail!("Unknown MEDIA_MODE: {other}. Must be 'disk' or 'bucket'")
            }
        };

        let bucket = BucketSettings {
            region: std::env::var("AWS_REGION").ok(),
            endpoint: std::env::var("AWS_ENDPOINT").ok(),
            access_key_id: std::env::var("AWS_ACCESS_KEY_ID").ok(),
            secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY").ok(),
            allow_http: std::env::var("AWS_ALLOW_HTTP")
                .unwrap_or_else(|_| "false".to_string())
                .parse::<bool>()
                .unwrap_or(false),
        };

        let serverless = std::env::var("SERVERLESS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
            || std::env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok()
            || std::env::var("VERCEL").is_ok();

        Ok(Self {
            bind_address,
            public_base_url,
            data_file,
            uploads_dir,
            persistence_mode,
            media_mode,
            data_bucket: std::env::var("DATA_BUCKET").ok(),
            media_bucket: std::env::var("MEDIA_BUCKET").ok(),
            bucket,
            serverless,
        })
    }
}

#[cfg(test)]
impl AppConfig {
    /// Local-only configuration rooted in a scratch directory.
    pub(crate) fn for_tests(root: &std::path::Path) -> Self {
        Self {
            bind_address: "127.0.0.1:0".parse().unwrap_or_else(|_| unreachable!()),
            public_base_url: "http://localhost:3000".to_string(),
            data_file: root.join("tours.json"),
            uploads_dir: root.join("uploads"),
            persistence_mode: None,
            media_mode: None,
            data_bucket: None,
            media_bucket: None,
            bucket: BucketSettings::default(),
            serverless: false,
        }
    }
}
