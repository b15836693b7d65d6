use serde::{Deserialize, Serialize};

/// Response for a successful media upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Error response body for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
