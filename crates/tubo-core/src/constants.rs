//! Calculator constants.

/// Compounding horizon used to derive the per-minute rate (about six months).
pub const TERM_MINUTES: u32 = 262_080;

/// Log length when the client does not ask for one.
pub const DEFAULT_LOG_MINUTES: u32 = 10;

/// Default upper bound on `logMinutes` (one day of entries).
pub const DEFAULT_MAX_LOG_MINUTES: u32 = 1_440;

/// Tier consulted by `/generate-dates` unless configured otherwise.
pub const DEFAULT_TIER: &str = "twoYears";

/// Offset of the display timezone, Philippine Time (UTC+8, no DST).
pub const DISPLAY_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Flat annual rate of the ten-minute compound simulation (14%).
pub const TEN_MINUTE_ANNUAL_RATE: f64 = 0.14;

/// Length of the ten-minute compound window in seconds.
///
/// The window is 720 seconds (12 minutes) even though the simulation is
/// published as "ten-minute compound". Clients depend on 720.
pub const TEN_MINUTE_TOTAL_SECONDS: u32 = 720;

/// Tax withheld from gross growth in the ten-minute simulation (20%).
pub const TEN_MINUTE_TAX_RATE: f64 = 0.20;

/// Decimal places used for currency figures such as the available balance.
pub const CURRENCY_PLACES: i32 = 2;

/// Decimal places used when printing per-minute earnings.
pub const EARNINGS_PLACES: usize = 6;
