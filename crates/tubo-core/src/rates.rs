//! Interest-rate tiers and piecewise-linear rate interpolation.
//!
//! The rate table file maps a tier name to a set of amount thresholds, each
//! carrying an annual rate in percent:
//!
//! ```json
//! { "twoYears": { "1000": 2.0, "5000": 3.0, "20000": 3.75 } }
//! ```
//!
//! Thresholds are stored keyed by [`OrderedFloat`] so every tier is sorted
//! ascending with distinct thresholds by construction. The table is loaded
//! once and never mutated afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use ordered_float::OrderedFloat;

use crate::compound::round_to;
use crate::error::{RateError, RateTableError};

/// Decimal places kept on an interpolated rate.
const RATE_PLACES: i32 = 2;

/// A single named rate schedule: threshold amount → annual rate (percent).
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    points: BTreeMap<OrderedFloat<f64>, f64>,
}

impl Tier {
    /// Build a tier from `(threshold, rate)` pairs.
    ///
    /// Rejects non-positive or non-finite thresholds, rates outside
    /// `0..=100`, repeated thresholds and empty input.
    pub fn from_points<I>(name: &str, points: I) -> Result<Self, RateTableError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut map = BTreeMap::new();
        for (threshold, rate) in points {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(RateTableError::InvalidThreshold {
                    tier: name.to_string(),
                    key: threshold.to_string(),
                });
            }
            if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
                return Err(RateTableError::InvalidRate {
                    tier: name.to_string(),
                    threshold,
                    rate,
                });
            }
            if map.insert(OrderedFloat(threshold), rate).is_some() {
                return Err(RateTableError::DuplicateThreshold {
                    tier: name.to_string(),
                    threshold,
                });
            }
        }
        if map.is_empty() {
            return Err(RateTableError::EmptyTier(name.to_string()));
        }
        Ok(Self { points: map })
    }

    /// Thresholds in ascending order.
    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.keys().map(|k| k.0)
    }

    /// Annual rate for `amount`, or `None` if no bracket contains it.
    ///
    /// Amounts at or below the smallest threshold get the smallest threshold's
    /// rate; at or above the largest, the largest's. An amount equal to a
    /// threshold gets that threshold's rate exactly. Anything in between is
    /// interpolated linearly and rounded to two decimals.
    pub fn interpolate(&self, amount: f64) -> Option<f64> {
        let (&lowest, &lowest_rate) = self.points.first_key_value()?;
        let (&highest, &highest_rate) = self.points.last_key_value()?;

        if amount <= lowest.0 {
            return Some(lowest_rate);
        }
        if amount >= highest.0 {
            return Some(highest_rate);
        }

        // NaN fails both clamps but OrderedFloat still orders it.
        if amount.is_nan() {
            return None;
        }

        let key = OrderedFloat(amount);
        if let Some(&rate) = self.points.get(&key) {
            return Some(rate);
        }

        let (low, r_low) = self.points.range(..key).next_back()?;
        let (high, r_high) = self.points.range(key..).next()?;
        let (low, high) = (low.0, high.0);

        let rate = (amount - low) * (r_high - r_low) / (high - low) + r_low;
        Some(round_to(rate, RATE_PLACES))
    }
}

/// Immutable mapping of tier name to [`Tier`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    tiers: BTreeMap<String, Tier>,
}

impl RateTable {
    /// Read and validate a rate table file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RateTableError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RateTableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.display(), tiers = table.tiers.len(), "rate table loaded");
        Ok(table)
    }

    /// Parse a rate table from its JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, RateTableError> {
        let parsed: BTreeMap<String, BTreeMap<String, f64>> = serde_json::from_str(raw)?;

        let mut tiers = BTreeMap::new();
        for (name, entries) in parsed {
            let mut points = Vec::with_capacity(entries.len());
            for (key, rate) in entries {
                let threshold = key
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|t| t.is_finite() && *t > 0.0)
                    .ok_or_else(|| RateTableError::InvalidThreshold {
                        tier: name.clone(),
                        key: key.clone(),
                    })?;
                points.push((threshold, rate));
            }
            let tier = Tier::from_points(&name, points)?;
            tiers.insert(name, tier);
        }
        Ok(Self { tiers })
    }

    /// Build a table from already-constructed tiers.
    pub fn from_tiers(tiers: impl IntoIterator<Item = (String, Tier)>) -> Self {
        Self {
            tiers: tiers.into_iter().collect(),
        }
    }

    /// Look up a tier by name.
    pub fn tier(&self, name: &str) -> Option<&Tier> {
        self.tiers.get(name)
    }

    /// Configured tier names, sorted.
    pub fn tier_names(&self) -> impl Iterator<Item = &str> {
        self.tiers.keys().map(String::as_str)
    }

    /// Resolve the annual rate for `amount` within the named tier.
    pub fn rate_for(&self, tier: &str, amount: f64) -> Result<f64, RateError> {
        let schedule = self
            .tier(tier)
            .ok_or_else(|| RateError::TierNotConfigured(tier.to_string()))?;
        schedule.interpolate(amount).ok_or(RateError::NoBracket(amount))
    }
}
