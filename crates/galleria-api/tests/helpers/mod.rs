//! Shared setup for API integration tests.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use galleria_api::setup;
use galleria_core::Config;

pub const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Configuration pointing at `images_api_url` (or with the gallery disabled).
pub fn test_config(images_api_url: Option<String>) -> Config {
    Config::from_lookup(|key| match key {
        "IMAGES_API_URL" => images_api_url.clone(),
        "UPSTREAM_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .expect("Failed to build test config")
}

pub fn test_server(config: Config) -> TestServer {
    let state = setup::build_state(config.clone()).expect("Failed to build state");
    let app = setup::routes::setup_routes(&config, state).expect("Failed to setup routes");
    TestServer::new(app).expect("Failed to create test server")
}

/// Server whose image store is the given mockito server at `/images`.
pub fn server_with_store(store: &mockito::ServerGuard) -> TestServer {
    test_server(test_config(Some(format!("{}/images", store.url()))))
}

pub fn disabled_server() -> TestServer {
    test_server(test_config(None))
}

/// `len` bytes (at least the signature) starting with a PNG signature.
pub fn png_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len.max(PNG_HEADER.len())];
    data[..PNG_HEADER.len()].copy_from_slice(PNG_HEADER);
    data
}

pub fn file_form(data: Vec<u8>, file_name: &str, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name)
        .mime_type(mime_type);
    MultipartForm::new().add_part("file", part)
}
