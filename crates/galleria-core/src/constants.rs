//! Upload limits shared by the gatekeeper and the HTTP boundary.

/// Hard ceiling for a single uploaded image (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Extensions accepted for uploads, lower-case with the leading dot.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];

/// Declared content types must start with this prefix (compared case-insensitively).
pub const IMAGE_CONTENT_TYPE_PREFIX: &str = "image/";

/// Slack added to the HTTP request-body limit for multipart boundaries and part headers.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
