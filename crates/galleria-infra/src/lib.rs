//! Galleria Infrastructure Library
//!
//! Shared infrastructure used by the Galleria binaries:
//! - Middleware (request ID, security headers)
//! - Telemetry initialization

pub mod middleware;
pub mod telemetry;

// Re-export commonly used types
pub use middleware::{
    request_id_middleware, security_headers_middleware, RequestId, REQUEST_ID_HEADER,
};
pub use telemetry::{init_telemetry, LogFormat};
