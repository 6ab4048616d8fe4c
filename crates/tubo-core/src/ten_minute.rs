//! Ten-minute compound simulation.
//!
//! A flat-rate demo: the deposit grows linearly toward `deposit * 14%` over a
//! 720-second window, with 20% tax withheld from the growth. Nothing is
//! stored between `start` and `calculate`; the client resubmits the deposit.

use serde::Serialize;

use crate::constants::{TEN_MINUTE_ANNUAL_RATE, TEN_MINUTE_TAX_RATE, TEN_MINUTE_TOTAL_SECONDS};

/// Parameters of the simulation, echoed to clients under their historic names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TenMinuteConstants {
    pub annual_rate: f64,
    pub total_seconds: u32,
    pub tax_rate: f64,
}

impl Default for TenMinuteConstants {
    fn default() -> Self {
        Self {
            annual_rate: TEN_MINUTE_ANNUAL_RATE,
            total_seconds: TEN_MINUTE_TOTAL_SECONDS,
            tax_rate: TEN_MINUTE_TAX_RATE,
        }
    }
}

impl TenMinuteConstants {
    /// Gross growth expected over the whole window.
    pub fn target_growth(&self, initial_deposit: f64) -> f64 {
        initial_deposit * self.annual_rate
    }

    /// Gross growth credited per elapsed second.
    pub fn growth_per_second(&self, initial_deposit: f64) -> f64 {
        self.target_growth(initial_deposit) / f64::from(self.total_seconds)
    }

    /// Fraction of gross growth kept after tax.
    fn net_factor(&self) -> f64 {
        1.0 - self.tax_rate
    }
}

/// Derived per-second rates returned by `start`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenMinuteQuote {
    pub initial_deposit: f64,
    pub target_growth: f64,
    pub growth_per_second: f64,
    pub net_growth_per_second: f64,
    pub constants: TenMinuteConstants,
}

/// Cosmetic mapping of elapsed wall time onto calendar-ish units.
///
/// 12 minutes make a "year", each minute a "month", 5 seconds a "day" and
/// the remainder is spread over hours and minutes. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeEquivalent {
    pub year: u64,
    pub month: u64,
    pub day: u64,
    pub hour: u64,
    pub minute: u64,
}

impl TimeEquivalent {
    pub fn from_elapsed(elapsed_minutes: u64, elapsed_seconds: u64) -> Self {
        let day_remainder = (elapsed_seconds % 5) as f64 * 4.8;
        Self {
            year: elapsed_minutes / 12,
            month: elapsed_minutes % 12,
            day: elapsed_seconds / 5,
            hour: day_remainder.floor() as u64,
            minute: ((day_remainder % 1.0) * 60.0).floor() as u64,
        }
    }
}

/// Valuation returned by `calculate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenMinuteValuation {
    pub current_value: f64,
    pub total_growth: f64,
    pub tax_amount: f64,
    pub net_growth: f64,
    pub time: TimeEquivalent,
}

/// Per-second growth rates for a fresh simulation.
pub fn start(constants: &TenMinuteConstants, initial_deposit: f64) -> TenMinuteQuote {
    let growth_per_second = constants.growth_per_second(initial_deposit);
    TenMinuteQuote {
        initial_deposit,
        target_growth: constants.target_growth(initial_deposit),
        growth_per_second,
        net_growth_per_second: growth_per_second * constants.net_factor(),
        constants: *constants,
    }
}

/// Value of the deposit after `elapsed_minutes:elapsed_seconds`.
///
/// Growth is not capped at the end of the window; a client that keeps
/// polling keeps accruing at the same per-second rate.
pub fn calculate(
    constants: &TenMinuteConstants,
    initial_deposit: f64,
    elapsed_minutes: u64,
    elapsed_seconds: u64,
) -> TenMinuteValuation {
    let total_elapsed_seconds = (elapsed_minutes * 60 + elapsed_seconds) as f64;
    let total_growth = constants.growth_per_second(initial_deposit) * total_elapsed_seconds;
    let net_growth = total_growth * constants.net_factor();

    TenMinuteValuation {
        current_value: initial_deposit + net_growth,
        total_growth,
        tax_amount: total_growth * constants.tax_rate,
        net_growth,
        time: TimeEquivalent::from_elapsed(elapsed_minutes, elapsed_seconds),
    }
}
