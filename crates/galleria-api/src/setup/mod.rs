//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use galleria_core::Config;
use galleria_infra::telemetry::DEFAULT_FILTER;
use galleria_infra::LogFormat;
use galleria_processing::Gatekeeper;
use galleria_storage::create_image_store;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    galleria_infra::init_telemetry(DEFAULT_FILTER, LogFormat::from_env())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        uploads_enabled = config.images_api_url().is_some(),
        "Configuration loaded and validated successfully"
    );

    let state = build_state(config)?;
    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}

/// Wire the image store and gatekeeper described by `config`.
pub fn build_state(config: Config) -> Result<Arc<AppState>> {
    let store = create_image_store(&config).context("Failed to create image store")?;
    let gatekeeper = Gatekeeper::new(store);

    Ok(Arc::new(AppState::new(config, gatekeeper)))
}
