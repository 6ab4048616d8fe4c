//! # tubo-server-lib — HTTP surface of the Tubo calculator.
//!
//! Wires the pure computations of `tubo-core` into an Axum router:
//! - `POST /generate-dates` — rate lookup plus minute-by-minute compounding log
//! - `POST /ten-minute-compound/start` — derived per-second growth rates
//! - `POST /ten-minute-compound/calculate` — valuation at an elapsed time
//! - `GET /health` — liveness probe
//!
//! Anything else falls through to the static asset directory.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
