//! Error types for the Tubo calculator.
use thiserror::Error;

/// Failure to load or validate the rate table file.
#[derive(Error, Debug)]
pub enum RateTableError {
    #[error("cannot read rate table {path}: {source}")] Io { path: String, source: std::io::Error },
    #[error("malformed rate table JSON: {0}")] Json(#[from] serde_json::Error),
    #[error("tier {tier:?}: threshold {key:?} is not a positive number")] InvalidThreshold { tier: String, key: String },
    #[error("tier {tier:?}: rate {rate} at threshold {threshold} is outside 0..=100")] InvalidRate { tier: String, threshold: f64, rate: f64 },
    #[error("tier {tier:?}: threshold {threshold} appears more than once")] DuplicateThreshold { tier: String, threshold: f64 },
    #[error("tier {0:?} has no thresholds")] EmptyTier(String),
}

/// No annual rate could be resolved for an amount.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateError {
    #[error("tier {0:?} is not configured")] TierNotConfigured(String),
    #[error("no bracket contains amount {0}")] NoBracket(f64),
}

/// A request field failed to parse or violated a constraint.
///
/// The `Display` text is returned verbatim to HTTP clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("\"currentMoney\" must be a non-negative number.")] CurrentMoney,
    #[error("\"amount\" must be a positive number.")] Amount,
    #[error("Deposit amount cannot exceed current money.")] ExceedsBalance,
    #[error("Invalid \"startDate\". Use YYYY-MM-DD.")] StartDate,
    #[error("\"logMinutes\" must be a non-negative whole number.")] LogMinutes,
    #[error("\"logMinutes\" cannot exceed {max}.")] LogMinutesTooLarge { max: u32 },
    #[error("Please provide a valid initial deposit amount greater than 0")] InitialDeposit,
    #[error("Please provide initialDeposit, elapsedMinutes, and elapsedSeconds")] MissingElapsed,
    #[error("\"{0}\" must be a non-negative whole number.")] Elapsed(&'static str),
}

/// The compounding log could not be produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompoundError {
    #[error("timestamp for minute {minute} is out of range")] TimestampOutOfRange { minute: u32 },
}
