//! API constants

use galleria_core::constants::{MAX_UPLOAD_BYTES, MULTIPART_OVERHEAD_BYTES};

/// API base path prefix
pub const API_BASE: &str = "/api";

/// Versioned API prefix used by every domain route
pub const API_PREFIX: &str = "/api/v0";

/// Request-body ceiling for the upload route: the image limit plus room for multipart framing.
pub const UPLOAD_BODY_LIMIT_BYTES: usize = MAX_UPLOAD_BYTES as usize + MULTIPART_OVERHEAD_BYTES;
