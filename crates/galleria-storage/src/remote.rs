//! HTTP image store backend

use crate::{ImageStore, ImageUpload, StoreError, StoreResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::time::Duration;

/// Image store reached over HTTP at a single endpoint URL.
#[derive(Clone, Debug)]
pub struct HttpImageStore {
    client: Client,
    endpoint: String,
}

impl HttpImageStore {
    /// Create a store with its own client; `timeout` bounds every request end to end.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn list(&self) -> StoreResult<Vec<String>> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
            });
        }

        // A literal `null` body is treated as an empty gallery.
        let images: Option<Vec<String>> = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        Ok(images.unwrap_or_default())
    }

    async fn upload(&self, image: ImageUpload) -> StoreResult<()> {
        let length = image.data.len() as u64;
        let part = Part::stream_with_length(Body::from(image.data), length)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| StoreError::InvalidRequest(format!("Invalid content type: {}", e)))?;

        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!(endpoint = %self.endpoint, status = status.as_u16(), "Image store accepted upload");
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
