use std::time::Duration;

use anyhow::Result;
use reqwest::{multipart, Client as ReqwestClient, StatusCode};
use shared_types::Tour;

/// Client for interacting with the Waymark tour service
pub struct TourClient {
    client: ReqwestClient,
    base_url: String,
}

impl TourClient {
    /// Create a new client instance
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// List every tour on the server
    pub async fn list_tours(&self) -> Result<Vec<Tour>> {
        let url = format!("{}/tours", self.base_url);
        let response = self.client.get(&url).send().await?;
        response.error_for_status_ref()?;

        Ok(response.json().await?)
    }

    /// Get one tour, or `None` if the identifier is unknown
    pub async fn get_tour(&self, id: &str) -> Result<Option<Tour>> {
        let url = format!("{}/tours/{id}", self.base_url);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        response.error_for_status_ref()?;

        Ok(Some(response.json().await?))
    }

    /// Create (or fully replace) a tour; the server assigns an id when the
    /// tour carries none
    pub async fn create_tour(&self, tour: &Tour) -> Result<Tour> {
        let url = format!("{}/tours", self.base_url);
        let response = self.client.post(&url).json(tour).send().await?;
        response.error_for_status_ref()?;

        Ok(response.json().await?)
    }

    /// Partially update a tour: only the fields present in `fields` change
    pub async fn update_tour(&self, id: &str, fields: serde_json::Value) -> Result<Tour> {
        let url = format!("{}/tours/{id}", self.base_url);
        let response = self.client.put(&url).json(&fields).send().await?;
        response.error_for_status_ref()?;

        Ok(response.json().await?)
    }

    /// Delete a tour; succeeds whether or not the id existed
    pub async fn delete_tour(&self, id: &str) -> Result<()> {
        let url = format!("{}/tours/{id}", self.base_url);
        let response = self.client.delete(&url).send().await?;
        response.error_for_status()?;

        Ok(())
    }

    /// Upload a media file, returning its public URL
    pub async fn upload(
        &self,
        data: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<String> {
        let url = format!("{}/upload", self.base_url);

        let part = multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        response.error_for_status_ref()?;

        let body: serde_json::Value = response.json().await?;
        body["url"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Upload response carried no url"))
    }

    /// Check the service is up
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        Ok(response.status().is_success())
    }
}
