//! Minute-by-minute compounding log.
//!
//! The annual rate (percent) is turned into an equivalent per-minute rate
//! over [`TERM_MINUTES`](crate::constants::TERM_MINUTES):
//!
//! ```text
//! rate_per_minute = (1 + R/100)^(1/term) - 1
//! amount(m)       = P * (1 + rate_per_minute)^m
//! earned(m)       = amount(m) - amount(m - 1)
//! ```
//!
//! Minute 0 records the deposit itself; every later minute records the
//! incremental interest and the running total of untransferred earnings.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset};

use crate::clock::format_display;
use crate::constants::{CURRENCY_PLACES, EARNINGS_PLACES};
use crate::error::CompoundError;

/// Round `value` to `places` decimal places (half away from zero).
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Per-minute compounding rate equivalent to `annual_rate` percent over
/// `term_minutes`.
pub fn rate_per_minute(annual_rate: f64, term_minutes: u32) -> f64 {
    (1.0 + annual_rate / 100.0).powf(1.0 / f64::from(term_minutes)) - 1.0
}

/// What a log entry reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryKind {
    /// Minute 0: the principal and the resolved annual rate.
    InitialDeposit { amount: f64, annual_rate: f64 },
    /// Minute m > 0: interest earned during the minute and the running total.
    Accrual { earned: f64, total_untransferred: f64 },
}

/// One simulated minute.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundLogEntry {
    pub minute: u32,
    pub timestamp: DateTime<FixedOffset>,
    pub kind: EntryKind,
}

impl fmt::Display for CompoundLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ts = format_display(&self.timestamp);
        match self.kind {
            EntryKind::InitialDeposit { amount, annual_rate } => write!(
                f,
                "Minute {}: {ts} — Initial deposit ₱{:.2} — Interest Rate: {:.2}%",
                self.minute,
                round_to(amount, CURRENCY_PLACES),
                round_to(annual_rate, CURRENCY_PLACES)
            ),
            EntryKind::Accrual {
                earned,
                total_untransferred,
            } => write!(
                f,
                "Minute {}: {ts} — Earned this minute: ₱{:.p$} — Total Untransferred Earnings: ₱{:.p$}",
                self.minute,
                round_to(earned, EARNINGS_PLACES as i32),
                round_to(total_untransferred, EARNINGS_PLACES as i32),
                p = EARNINGS_PLACES
            ),
        }
    }
}

/// Result of [`build_log`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundLog {
    pub rate_per_minute: f64,
    /// Entries for minutes `0..=log_minutes`, in order.
    pub entries: Vec<CompoundLogEntry>,
}

impl CompoundLog {
    /// Rendered log lines.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

/// Build the compounding log for `principal` at `annual_rate` percent.
///
/// Produces `log_minutes + 1` entries; entry `m` is stamped `deposit + m`
/// minutes.
pub fn build_log(
    principal: f64,
    annual_rate: f64,
    term_minutes: u32,
    deposit: DateTime<FixedOffset>,
    log_minutes: u32,
) -> Result<CompoundLog, CompoundError> {
    let rpm = rate_per_minute(annual_rate, term_minutes);
    let growth = 1.0 + rpm;

    let mut entries = Vec::with_capacity(log_minutes as usize + 1);
    let mut previous_amount = principal;
    let mut total_untransferred = 0.0;

    for minute in 0..=log_minutes {
        let timestamp = deposit
            .checked_add_signed(Duration::minutes(i64::from(minute)))
            .ok_or(CompoundError::TimestampOutOfRange { minute })?;

        let kind = if minute == 0 {
            EntryKind::InitialDeposit {
                amount: principal,
                annual_rate,
            }
        } else {
            let current_amount = principal * growth.powf(f64::from(minute));
            let earned = current_amount - previous_amount;
            total_untransferred += earned;
            previous_amount = current_amount;
            EntryKind::Accrual {
                earned,
                total_untransferred,
            }
        };

        entries.push(CompoundLogEntry {
            minute,
            timestamp,
            kind,
        });
    }

    Ok(CompoundLog {
        rate_per_minute: rpm,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::pht;
    use crate::constants::TERM_MINUTES;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn deposit() -> DateTime<FixedOffset> {
        pht().with_ymd_and_hms(2025, 5, 29, 16, 23, 1).unwrap()
    }

    #[test]
    fn round_to_two_places() {
        assert_eq!(round_to(1234.5678, 2), 1234.57);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-0.125, 2), -0.13);
    }

    #[test]
    fn rate_per_minute_compounds_back_to_annual() {
        let rpm = rate_per_minute(8.5, TERM_MINUTES);
        assert!(rpm > 0.0 && rpm < 1e-6);
        let over_term = (1.0 + rpm).powf(f64::from(TERM_MINUTES));
        assert_relative_eq!(over_term, 1.085, max_relative = 1e-9);
    }

    #[test]
    fn zero_rate_has_zero_per_minute_rate() {
        assert_eq!(rate_per_minute(0.0, TERM_MINUTES), 0.0);
    }

    #[test]
    fn zero_minutes_yields_only_the_deposit() {
        let log = build_log(1000.0, 2.5, TERM_MINUTES, deposit(), 0).unwrap();
        assert_eq!(log.entries.len(), 1);
        assert_eq!(
            log.entries[0].kind,
            EntryKind::InitialDeposit {
                amount: 1000.0,
                annual_rate: 2.5
            }
        );
    }

    #[test]
    fn entries_cover_zero_through_n() {
        let log = build_log(1000.0, 2.5, TERM_MINUTES, deposit(), 10).unwrap();
        let minutes: Vec<u32> = log.entries.iter().map(|e| e.minute).collect();
        assert_eq!(minutes, (0..=10).collect::<Vec<_>>());
        for (i, entry) in log.entries.iter().enumerate() {
            assert_eq!(entry.timestamp, deposit() + Duration::minutes(i as i64));
        }
    }

    #[test]
    fn earned_is_incremental_difference() {
        let principal = 50_000.0;
        let log = build_log(principal, 3.0, TERM_MINUTES, deposit(), 5).unwrap();
        let growth = 1.0 + log.rate_per_minute;
        for entry in &log.entries[1..] {
            let EntryKind::Accrual { earned, .. } = entry.kind else {
                panic!("minute {} should be an accrual", entry.minute);
            };
            let m = f64::from(entry.minute);
            let expected = principal * growth.powf(m) - principal * growth.powf(m - 1.0);
            assert_relative_eq!(earned, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn renders_initial_line() {
        let log = build_log(1000.0, 2.5, TERM_MINUTES, deposit(), 1).unwrap();
        assert_eq!(
            log.entries[0].to_string(),
            "Minute 0: 5/29/2025, 4:23:01 PM — Initial deposit ₱1000.00 — Interest Rate: 2.50%"
        );
    }

    #[test]
    fn ties_round_half_up_when_rendered() {
        let deposit_line = CompoundLogEntry {
            minute: 0,
            timestamp: deposit(),
            kind: EntryKind::InitialDeposit {
                amount: 1000.125,
                annual_rate: 1.125,
            },
        };
        assert_eq!(
            deposit_line.to_string(),
            "Minute 0: 5/29/2025, 4:23:01 PM — Initial deposit ₱1000.13 — Interest Rate: 1.13%"
        );

        // 2^-7 sits exactly on a sixth-decimal tie.
        let accrual_line = CompoundLogEntry {
            minute: 1,
            timestamp: deposit() + Duration::minutes(1),
            kind: EntryKind::Accrual {
                earned: 0.007_812_5,
                total_untransferred: 1.007_812_5,
            },
        };
        assert_eq!(
            accrual_line.to_string(),
            "Minute 1: 5/29/2025, 4:24:01 PM — Earned this minute: ₱0.007813 — Total Untransferred Earnings: ₱1.007813"
        );
    }

    #[test]
    fn renders_accrual_line_with_six_decimals() {
        let log = build_log(1000.0, 2.5, TERM_MINUTES, deposit(), 1).unwrap();
        assert_eq!(
            log.entries[1].to_string(),
            "Minute 1: 5/29/2025, 4:24:01 PM — Earned this minute: ₱0.000094 — Total Untransferred Earnings: ₱0.000094"
        );
        assert_eq!(log.lines().len(), 2);
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn running_total_is_consistent(
            principal in 0.01f64..1e7,
            rate in 0.0f64..20.0,
            minutes in 0u32..200,
        ) {
            let log = build_log(principal, rate, TERM_MINUTES, deposit(), minutes).unwrap();
            prop_assert_eq!(log.entries.len(), minutes as usize + 1);
            let is_initial = matches!(log.entries[0].kind, EntryKind::InitialDeposit { .. });
            prop_assert!(is_initial);

            let mut previous_total = 0.0;
            for entry in &log.entries[1..] {
                match entry.kind {
                    EntryKind::Accrual { earned, total_untransferred } => {
                        prop_assert_eq!(previous_total + earned, total_untransferred);
                        previous_total = total_untransferred;
                    }
                    EntryKind::InitialDeposit { .. } => {
                        prop_assert!(false, "minute {} reports a deposit", entry.minute);
                    }
                }
            }
        }
    }
}
