//! Galleria API Library
//!
//! This crate provides the HTTP handlers and application setup for the
//! gallery (list/upload relayed to a remote image store) and the calculator.

mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;
mod utils;

pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
