//! Tubo calculator server binary.
//!
//! Loads the rate table, then serves the JSON API and the static UI until
//! Ctrl+C. Every flag can also be supplied through the environment.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use tubo_core::constants::{DEFAULT_MAX_LOG_MINUTES, DEFAULT_TIER};
use tubo_core::RateTable;
use tubo_server_lib::config::DEFAULT_PORT;
use tubo_server_lib::{router, AppState, ServerConfig};

/// Tubo — investment growth calculator.
#[derive(Parser, Debug)]
#[command(name = "tubo-server", version, about = "Investment growth calculator HTTP API")]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Externally advertised base URL (defaults to http://localhost:<port>)
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,

    /// Rate table JSON file
    #[arg(long, env = "RATES_PATH", default_value = "investmentrates.json")]
    rates_path: PathBuf,

    /// Directory of static assets served for non-API paths
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    public_dir: PathBuf,

    /// Rate tier used by /generate-dates
    #[arg(long, env = "RATE_TIER", default_value = DEFAULT_TIER)]
    rate_tier: String,

    /// Largest logMinutes a client may request
    #[arg(long, env = "MAX_LOG_MINUTES", default_value_t = DEFAULT_MAX_LOG_MINUTES)]
    max_log_minutes: u32,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    log_format: String,
}

impl Args {
    fn into_config(self) -> (ServerConfig, String, String) {
        let config = ServerConfig {
            host: self.host,
            port: self.port,
            base_url: self.base_url,
            rates_path: self.rates_path,
            public_dir: self.public_dir,
            rate_tier: self.rate_tier,
            max_log_minutes: self.max_log_minutes,
        };
        (config, self.log_level, self.log_format)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let (config, log_level, log_format) = Args::parse().into_config();
    init_logging(&log_level, &log_format);

    info!(
        bind = %config.bind_addr(),
        rates = %config.rates_path.display(),
        public = %config.public_dir.display(),
        tier = %config.rate_tier,
        max_log_minutes = config.max_log_minutes,
        "Starting tubo-server"
    );

    let rates = RateTable::load(&config.rates_path)
        .with_context(|| format!("Failed to load rate table at {}", config.rates_path.display()))?;

    match rates.tier(&config.rate_tier) {
        Some(tier) => info!(
            tier = %config.rate_tier,
            thresholds = tier.thresholds().count(),
            "Rate tier ready"
        ),
        None => warn!(
            tier = %config.rate_tier,
            available = ?rates.tier_names().collect::<Vec<_>>(),
            "Configured rate tier is missing; /generate-dates will find no rate"
        ),
    }

    let bind_addr = config.bind_addr();
    let base_url = config.base_url();
    let app = router(AppState::new(rates, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;

    info!("Server running → {base_url}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("tubo-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Initialize tracing with the given level and output format.
///
/// `format = "json"` emits structured JSON lines; anything else is text.
fn init_logging(level: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true))
            .init();
    }
}
