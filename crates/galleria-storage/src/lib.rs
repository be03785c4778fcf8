//! Galleria Storage Library
//!
//! The gallery never stores images itself: listing and uploading are relayed to a
//! remote image store. This crate defines the [`ImageStore`] seam and the
//! [`HttpImageStore`] backend that talks to the store over HTTP.
//!
//! **Store contract:** `GET <endpoint>` returns a JSON array of strings (image
//! identifiers or URLs); `POST <endpoint>` accepts `multipart/form-data` with a
//! single part named `file`.

pub mod factory;
pub mod remote;
pub mod traits;

pub use factory::create_image_store;
pub use remote::HttpImageStore;
pub use traits::{ImageStore, ImageUpload, StoreError, StoreResult};
