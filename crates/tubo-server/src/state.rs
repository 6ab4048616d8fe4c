//! Shared, read-only application state.

use std::sync::Arc;

use tubo_core::{Clock, RateTable, SystemClock};

use crate::config::ServerConfig;

/// State handed to every Axum handler. Nothing in it is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Rate table loaded once at startup.
    pub rates: Arc<RateTable>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Source of "now" for deposit instants.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// State backed by the host clock.
    pub fn new(rates: RateTable, config: ServerConfig) -> Self {
        Self::with_clock(rates, config, Arc::new(SystemClock))
    }

    pub fn with_clock(rates: RateTable, config: ServerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            rates: Arc::new(rates),
            config: Arc::new(config),
            clock,
        }
    }
}
