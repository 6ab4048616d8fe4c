//! Server configuration.
//!
//! Built by the binary from CLI flags and environment variables; the library
//! only sees the resolved values.

use std::path::PathBuf;

use tubo_core::constants::{DEFAULT_MAX_LOG_MINUTES, DEFAULT_TIER};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for a server instance.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Externally advertised base URL. `None` means `http://localhost:<port>`.
    pub base_url: Option<String>,
    /// Path of the rate table JSON file.
    pub rates_path: PathBuf,
    /// Directory served for non-API paths.
    pub public_dir: PathBuf,
    /// Tier consulted by `/generate-dates`.
    pub rate_tier: String,
    /// Largest accepted `logMinutes`.
    pub max_log_minutes: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            base_url: None,
            rates_path: PathBuf::from("investmentrates.json"),
            public_dir: PathBuf::from("public"),
            rate_tier: DEFAULT_TIER.to_string(),
            max_log_minutes: DEFAULT_MAX_LOG_MINUTES,
        }
    }
}

impl ServerConfig {
    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL announced in the startup log.
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}
