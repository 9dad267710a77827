//! Shared numeric helpers for metric formulas.

use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Logarithmic normalization of a raw count against a scale constant.
///
/// Counts above the scale constant clamp to 1 so the result stays in [0, 1].
#[must_use]
pub fn log_normalize(value: f64, scale: f64) -> f64 {
    ((value + 1.0).ln() / (scale + 1.0).ln()).min(1.0)
}

/// 1.0 when a boolean feature is present, 0.0 otherwise.
#[must_use]
pub const fn indicator(present: bool) -> f64 {
    if present { 1.0 } else { 0.0 }
}

/// Fractional hours between two instants, order-insensitive.
#[expect(clippy::cast_precision_loss, reason = "millisecond spans are far below 2^52")]
#[must_use]
pub fn hours_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    (b - a).num_milliseconds().abs() as f64 / MILLIS_PER_HOUR
}

/// Whole days elapsed since a past instant, rounded up.
#[expect(clippy::cast_precision_loss, reason = "millisecond spans are far below 2^52")]
#[must_use]
pub fn days_since(then: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    ((now - then).num_milliseconds() as f64 / MILLIS_PER_DAY).ceil()
}
