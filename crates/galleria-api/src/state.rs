//! Application state shared by all handlers.

use galleria_core::Config;
use galleria_processing::Gatekeeper;

/// Everything a request handler may need. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub gatekeeper: Gatekeeper,
}

impl AppState {
    pub fn new(config: Config, gatekeeper: Gatekeeper) -> Self {
        Self { config, gatekeeper }
    }
}
