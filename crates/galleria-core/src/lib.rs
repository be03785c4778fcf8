//! Galleria Core Library
//!
//! This crate provides the configuration, error types and upload limits that are
//! shared across all Galleria components.

pub mod config;
pub mod constants;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
