//! Gatekeeper in front of the remote image store.
//!
//! Listing never fails from the caller's point of view; uploading always ends
//! in exactly one [`UploadOutcome`].

use std::sync::Arc;

use galleria_storage::{ImageStore, ImageUpload, StoreError};
use tokio::io::AsyncRead;

use crate::signature::ImageFormat;
use crate::validator::{UploadCandidate, UploadValidator, ValidationError};

/// Result of a single upload attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The store accepted the image.
    Uploaded { format: ImageFormat },
    /// No image store is configured.
    Disabled,
    /// Refused locally; nothing was sent.
    Rejected(ValidationError),
    /// The store answered with a non-success status.
    RemoteRejected { status: u16 },
    /// The store could not be reached.
    NetworkError,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded { .. })
    }

    /// Message suitable for showing to the uploader.
    pub fn message(&self) -> String {
        match self {
            UploadOutcome::Uploaded { .. } => "Upload successful.".to_string(),
            UploadOutcome::Disabled => "Upload endpoint is not configured.".to_string(),
            UploadOutcome::Rejected(err) => err.reason(),
            UploadOutcome::RemoteRejected { status } => {
                format!("Upload failed (status {}).", status)
            }
            UploadOutcome::NetworkError => "Network error during upload.".to_string(),
        }
    }
}

/// Decides what reaches the image store.
///
/// Holds no per-request state, so one instance is shared by every request.
#[derive(Clone)]
pub struct Gatekeeper {
    store: Option<Arc<dyn ImageStore>>,
    validator: Arc<UploadValidator>,
}

impl Gatekeeper {
    /// `None` disables the gallery: listing is empty and uploads are refused.
    pub fn new(store: Option<Arc<dyn ImageStore>>) -> Self {
        Self {
            store,
            validator: Arc::new(UploadValidator::default()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Images currently in the store, in store order. Any failure yields an empty list.
    pub async fn list_images(&self) -> Vec<String> {
        let Some(store) = &self.store else {
            return Vec::new();
        };

        match store.list().await {
            Ok(images) => {
                tracing::debug!(count = images.len(), "Fetched image list");
                images
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    endpoint = %store.endpoint(),
                    "Failed to get image list"
                );
                Vec::new()
            }
        }
    }

    /// Validate `candidate` and, if it passes, forward it to the store.
    #[tracing::instrument(skip_all, fields(file_name = %candidate.file_name))]
    pub async fn upload<R>(&self, candidate: UploadCandidate<R>) -> UploadOutcome
    where
        R: AsyncRead + Unpin,
    {
        let Some(store) = &self.store else {
            tracing::info!("Upload refused, no image store configured");
            return UploadOutcome::Disabled;
        };

        let validated = match self.validator.validate(candidate).await {
            Ok(validated) => validated,
            Err(e) => {
                tracing::debug!(reason = %e, "Upload rejected");
                return UploadOutcome::Rejected(e);
            }
        };

        let format = validated.format;
        let size = validated.data.len();
        let upload = ImageUpload {
            file_name: validated.file_name,
            content_type: validated.content_type,
            data: validated.data,
        };

        match store.upload(upload).await {
            Ok(()) => {
                tracing::info!(format = %format, size, "Image uploaded");
                UploadOutcome::Uploaded { format }
            }
            Err(StoreError::Rejected { status }) => {
                tracing::warn!(
                    status,
                    endpoint = %store.endpoint(),
                    "Image store rejected upload"
                );
                UploadOutcome::RemoteRejected { status }
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    endpoint = %store.endpoint(),
                    "Network error during upload"
                );
                UploadOutcome::NetworkError
            }
        }
    }
}
