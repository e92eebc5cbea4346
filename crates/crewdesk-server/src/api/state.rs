use std::sync::Arc;

use crewdesk_agent::RunCoordinator;

use crate::config::ServerConfig;

/// Core application state shared across all API handlers.
pub struct AppCore {
    pub coordinator: RunCoordinator,
    /// Whether the optional search tool's credential is configured; the
    /// frontend uses this to annotate the tool checkbox.
    pub serper_configured: bool,
}

impl AppCore {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            coordinator: RunCoordinator::new(config.engine_settings()),
            serper_configured: config.serper_api_key.is_some(),
        }
    }
}

pub type AppState = Arc<AppCore>;
