//! Inflation/growth compounding helpers.
//!
//! Monetary inputs in a scenario are expressed in year-zero money and
//! indexed forward by a fixed annual rate. The rate is assumed constant for
//! the whole run; a time-varying rate would need the previous year's value
//! rather than the starting value.

/// Compound `value` at `rate` over `periods` years.
pub fn adjust(value: f64, rate: f64, periods: u32) -> f64 {
    value * (1.0 + rate).powi(periods as i32)
}

/// The cumulative index factor for `periods` years at `rate`.
///
/// `adjust(v, rate, periods) == v * index_factor(rate, periods)`.
pub fn index_factor(rate: f64, periods: u32) -> f64 {
    (1.0 + rate).powi(periods as i32)
}
