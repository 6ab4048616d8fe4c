//! Time source and the fixed display timezone (Philippine Time).
//!
//! All user-facing timestamps are rendered in PHT regardless of the host's
//! locale or timezone.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Timelike, Utc};

use crate::constants::DISPLAY_UTC_OFFSET_SECS;
use crate::error::ValidationError;

/// Source of the current instant.
///
/// Handlers take the clock from shared state so tests can pin "now".
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The display timezone, UTC+8.
pub fn pht() -> FixedOffset {
    FixedOffset::east_opt(DISPLAY_UTC_OFFSET_SECS).expect("UTC+8 is a valid offset")
}

/// Render an instant the way the calculator UI shows it, e.g.
/// `5/29/2025, 4:23:01 PM`.
pub fn format_display<Tz: chrono::TimeZone>(ts: &DateTime<Tz>) -> String {
    ts.with_timezone(&pht())
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// Derive the deposit instant.
///
/// With a calendar date, the PHT time-of-day of `now` (whole seconds) is
/// attached to that date and the result is read as PHT. Without one the
/// deposit happens `now`.
pub fn deposit_instant(
    start_date: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> Result<DateTime<FixedOffset>, ValidationError> {
    let local_now = now.with_timezone(&pht());
    let Some(date) = start_date else {
        return Ok(local_now);
    };

    let time = NaiveTime::from_hms_opt(local_now.hour(), local_now.minute(), local_now.second())
        .ok_or(ValidationError::StartDate)?;
    date.and_time(time)
        .and_local_timezone(pht())
        .single()
        .ok_or(ValidationError::StartDate)
}
