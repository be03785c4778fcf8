//! Image store factory

use crate::{HttpImageStore, ImageStore, StoreResult};
use galleria_core::Config;
use std::sync::Arc;
use std::time::Duration;

/// Create the image store described by `config`.
///
/// Returns `Ok(None)` when no store URL is configured; callers treat that as the
/// gallery being disabled.
pub fn create_image_store(config: &Config) -> StoreResult<Option<Arc<dyn ImageStore>>> {
    let Some(url) = config.images_api_url() else {
        tracing::info!("IMAGES_API_URL not set, gallery is disabled");
        return Ok(None);
    };

    let timeout = Duration::from_secs(config.upstream_timeout_secs());
    let store = HttpImageStore::new(url, timeout)?;
    tracing::info!(endpoint = %url, timeout_secs = timeout.as_secs(), "Image store configured");

    Ok(Some(Arc::new(store)))
}
