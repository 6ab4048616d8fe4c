//! # tubo-core — Numeric core of the Tubo investment calculator.
//!
//! Every function here is a pure computation over its inputs plus the
//! immutable [`RateTable`] loaded at startup:
//! - **Rate interpolation**: a deposit amount maps to an annual rate by
//!   piecewise-linear interpolation over a tier's thresholds, clamped at both ends.
//! - **Compounding log**: the annual rate is converted to a per-minute rate over
//!   a fixed term and a minute-by-minute growth log is produced.
//! - **Ten-minute compound**: a flat-rate, fixed-window demo simulation.
//! - **Request validation**: loosely-typed JSON bodies are parsed into
//!   validated requests with field-specific error messages.

pub mod clock;
pub mod compound;
pub mod constants;
pub mod error;
pub mod rates;
pub mod request;
pub mod ten_minute;

pub use clock::{Clock, FixedClock, SystemClock};
pub use compound::{CompoundLog, CompoundLogEntry, EntryKind};
pub use rates::{RateTable, Tier};
