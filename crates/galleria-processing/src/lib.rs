//! Galleria Processing Library
//!
//! Validation of untrusted image uploads and the [`Gatekeeper`] that decides
//! what reaches the remote image store.
//!
//! Checks run cheapest first: size, extension and content type are decided
//! from metadata alone, before a single body byte is read. Only then is the
//! body buffered and its leading bytes compared against known image
//! signatures, and only a fully validated upload is forwarded.

pub mod gatekeeper;
pub mod signature;
pub mod validator;

pub use gatekeeper::{Gatekeeper, UploadOutcome};
pub use signature::{detect_format, sniff, ImageFormat};
pub use validator::{UploadCandidate, UploadValidator, ValidatedUpload, ValidationError};
