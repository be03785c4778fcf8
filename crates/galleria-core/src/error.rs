//! Error types module
//!
//! All errors surfaced to HTTP callers are unified under the `AppError` enum. Each
//! variant self-describes how it should be presented through the `ErrorMetadata`
//! trait (status code, machine-readable code, log level, ...).

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a remote store refusing a file
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_IMAGE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Invalid file extension: {0}")]
    InvalidExtension(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    #[error("Upload disabled: {0}")]
    UploadDisabled(String),

    #[error("Image store rejected upload with status {status}")]
    UpstreamRejected { status: u16 },

    #[error("Image store unavailable: {0}")]
    UpstreamUnavailable(String),
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size to 10 MB or less"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidExtension(_) => (
            400,
            "INVALID_EXTENSION",
            false,
            Some("Use one of .jpg, .jpeg, .png, .gif, .bmp, .webp"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedMediaType(_) => (
            415,
            "INVALID_CONTENT_TYPE",
            false,
            Some("Send the file with an image/* content type"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidImage(_) => (
            400,
            "INVALID_IMAGE",
            false,
            Some("Check image format and try a different file"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidExpression(_) => (
            400,
            "INVALID_EXPRESSION",
            false,
            Some("Use the form '<number> <op> <number>' with op one of + - * /"),
            false,
            LogLevel::Debug,
        ),
        AppError::UploadDisabled(_) => (
            503,
            "UPLOAD_DISABLED",
            false,
            Some("Configure IMAGES_API_URL to enable uploads"),
            false,
            LogLevel::Warn,
        ),
        AppError::UpstreamRejected { .. } => (
            502,
            "UPSTREAM_REJECTED",
            true,
            Some("Retry after a short delay"),
            false,
            LogLevel::Warn,
        ),
        AppError::UpstreamUnavailable(_) => (
            502,
            "UPSTREAM_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::InvalidExtension(_) => "InvalidExtension",
            AppError::UnsupportedMediaType(_) => "UnsupportedMediaType",
            AppError::InvalidImage(_) => "InvalidImage",
            AppError::InvalidExpression(_) => "InvalidExpression",
            AppError::UploadDisabled(_) => "UploadDisabled",
            AppError::UpstreamRejected { .. } => "UpstreamRejected",
            AppError::UpstreamUnavailable(_) => "UpstreamUnavailable",
        }
    }

    /// Internal description, shown to clients outside production
    pub fn detailed_message(&self) -> String {
        self.to_string()
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::InvalidExtension(ref msg) => msg.clone(),
            AppError::UnsupportedMediaType(ref msg) => msg.clone(),
            AppError::InvalidImage(ref msg) => msg.clone(),
            AppError::InvalidExpression(ref msg) => msg.clone(),
            AppError::UploadDisabled(ref msg) => msg.clone(),
            AppError::UpstreamRejected { status } => {
                format!("Upload failed (status {}).", status)
            }
            AppError::UpstreamUnavailable(_) => "Network error during upload.".to_string(),
        }
    }
}
