//! Image store abstraction trait

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Image store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store answered with a non-success status.
    #[error("Image store responded with status {status}")]
    Rejected { status: u16 },

    /// The request never produced a response (connect, DNS, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response from image store: {0}")]
    InvalidResponse(String),

    /// The outgoing request could not be built from the caller's data.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A validated image ready to be forwarded to the store.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// File name sent on the multipart part (no directory components).
    pub file_name: String,
    /// Content type as declared by the original uploader.
    pub content_type: String,
    pub data: Bytes,
}

/// Remote image store
///
/// Implementations perform at most one outbound request per call and hold no
/// state between calls.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Fetch the list of image identifiers, in the order the store returns them.
    async fn list(&self) -> StoreResult<Vec<String>>;

    /// Forward one image as a multipart `file` part.
    async fn upload(&self, image: ImageUpload) -> StoreResult<()>;

    /// Endpoint this store talks to (for logging).
    fn endpoint(&self) -> &str;
}
