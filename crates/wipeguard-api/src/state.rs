//! Application state shared by every handler.

use wipeguard_core::Config;
use wipeguard_services::SessionService;

pub struct AppState {
    pub config: Config,
    pub sessions: SessionService,
}

impl AppState {
    pub fn new(config: Config, sessions: SessionService) -> Self {
        Self { config, sessions }
    }
}
