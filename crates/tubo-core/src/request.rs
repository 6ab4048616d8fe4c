//! Request bodies and their validation.
//!
//! Bodies are deserialized with every field as an optional raw JSON value and
//! then parsed explicitly. A numeric field accepts a JSON number or a string
//! holding a decimal number; anything else is rejected with the field's
//! [`ValidationError`] instead of being coerced.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::compound::round_to;
use crate::constants::{CURRENCY_PLACES, DEFAULT_LOG_MINUTES};
use crate::error::ValidationError;

/// Largest integer a JavaScript client can send without losing precision.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Outcome of reading one numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric {
    Missing,
    Invalid,
    Value(f64),
}

fn numeric(field: &Option<Value>) -> Numeric {
    match field {
        None => Numeric::Missing,
        Some(Value::Number(n)) => n.as_f64().map_or(Numeric::Invalid, Numeric::Value),
        Some(Value::String(s)) if s.trim().is_empty() => Numeric::Missing,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map_or(Numeric::Invalid, Numeric::Value),
        Some(_) => Numeric::Invalid,
    }
}

fn whole(value: f64) -> Option<u64> {
    (value >= 0.0 && value.fract() == 0.0 && value <= MAX_SAFE_INTEGER).then_some(value as u64)
}

/// Raw `POST /generate-dates` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDatesBody {
    pub current_money: Option<Value>,
    pub amount: Option<Value>,
    pub start_date: Option<Value>,
    pub log_minutes: Option<Value>,
}

/// A validated deposit.
#[derive(Debug, Clone, PartialEq)]
pub struct DepositRequest {
    pub current_money: f64,
    pub amount: f64,
    pub start_date: Option<NaiveDate>,
    pub log_minutes: u32,
}

impl DepositRequest {
    /// Validate a raw body.
    ///
    /// Fields are checked in order `currentMoney`, `amount`, balance,
    /// `startDate`, `logMinutes`; the first failure is returned.
    pub fn parse(body: &GenerateDatesBody, max_log_minutes: u32) -> Result<Self, ValidationError> {
        let current_money = match numeric(&body.current_money) {
            Numeric::Value(v) if v >= 0.0 => v,
            _ => return Err(ValidationError::CurrentMoney),
        };
        let amount = match numeric(&body.amount) {
            Numeric::Value(v) if v > 0.0 => v,
            _ => return Err(ValidationError::Amount),
        };
        if amount > current_money {
            return Err(ValidationError::ExceedsBalance);
        }

        let start_date = match &body.start_date {
            None => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                    .map_err(|_| ValidationError::StartDate)?,
            ),
            Some(_) => return Err(ValidationError::StartDate),
        };

        let log_minutes = match numeric(&body.log_minutes) {
            Numeric::Missing => DEFAULT_LOG_MINUTES,
            Numeric::Invalid => return Err(ValidationError::LogMinutes),
            Numeric::Value(v) => {
                let minutes = whole(v).ok_or(ValidationError::LogMinutes)?;
                u32::try_from(minutes)
                    .ok()
                    .filter(|m| *m <= max_log_minutes)
                    .ok_or(ValidationError::LogMinutesTooLarge { max: max_log_minutes })?
            }
        };

        Ok(Self {
            current_money,
            amount,
            start_date,
            log_minutes,
        })
    }

    /// Money left on hand after the deposit, to the cent.
    pub fn available_balance(&self) -> f64 {
        round_to(self.current_money - self.amount, CURRENCY_PLACES)
    }
}

/// Raw `POST /ten-minute-compound/start` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenMinuteStartBody {
    pub initial_deposit: Option<Value>,
}

/// A validated simulation start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TenMinuteStartRequest {
    pub initial_deposit: f64,
}

impl TenMinuteStartRequest {
    pub fn parse(body: &TenMinuteStartBody) -> Result<Self, ValidationError> {
        match numeric(&body.initial_deposit) {
            Numeric::Value(v) if v > 0.0 => Ok(Self { initial_deposit: v }),
            _ => Err(ValidationError::InitialDeposit),
        }
    }
}

/// Raw `POST /ten-minute-compound/calculate` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenMinuteCalculateBody {
    pub initial_deposit: Option<Value>,
    pub elapsed_minutes: Option<Value>,
    pub elapsed_seconds: Option<Value>,
}

/// A validated simulation checkpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TenMinuteCalculateRequest {
    pub initial_deposit: f64,
    pub elapsed_minutes: u64,
    pub elapsed_seconds: u64,
}

impl TenMinuteCalculateRequest {
    /// Validate a raw body. Zero is a valid elapsed value; only absent
    /// fields count as missing.
    pub fn parse(body: &TenMinuteCalculateBody) -> Result<Self, ValidationError> {
        let deposit = numeric(&body.initial_deposit);
        let minutes = numeric(&body.elapsed_minutes);
        let seconds = numeric(&body.elapsed_seconds);

        if [deposit, minutes, seconds].contains(&Numeric::Missing) {
            return Err(ValidationError::MissingElapsed);
        }

        let initial_deposit = match deposit {
            Numeric::Value(v) if v > 0.0 => v,
            _ => return Err(ValidationError::InitialDeposit),
        };
        let elapsed = |field: Numeric, name: &'static str| match field {
            Numeric::Value(v) => whole(v).ok_or(ValidationError::Elapsed(name)),
            _ => Err(ValidationError::Elapsed(name)),
        };

        Ok(Self {
            initial_deposit,
            elapsed_minutes: elapsed(minutes, "elapsedMinutes")?,
            elapsed_seconds: elapsed(seconds, "elapsedSeconds")?,
        })
    }
}
