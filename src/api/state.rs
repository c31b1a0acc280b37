//! Shared application state for the API.

use std::sync::Arc;

use crate::config::{ConfigLoader, EngineSettings, StateTaxTable};

/// State shared by every request handler.
///
/// The configuration is loaded once at startup and only read afterwards, so
/// cloning the state is a reference-count bump.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Host defaults such as the safety cap percentages.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// The state income tax table.
    pub fn state_taxes(&self) -> &StateTaxTable {
        self.config.state_taxes()
    }
}
