//! Period growth.
//!
//! Percentage price change between the first and last available close of a period.
//! growth = (end - start) / start * 100

use crate::data::provider::{PriceField, RawBar};

/// Percentage change from `start` to `end`.
///
/// No guard against a zero start price; use [`checked_growth_rate`] for
/// provider data.
pub fn growth_rate(start: f64, end: f64) -> f64 {
    (end - start) / start * 100.0
}

/// Growth, or `None` when either price is not finite or the start price is
/// zero or negative.
pub fn checked_growth_rate(start: f64, end: f64) -> Option<f64> {
    if !start.is_finite() || !end.is_finite() || start <= 0.0 {
        return None;
    }
    Some(growth_rate(start, end))
}

/// First and last finite prices in a date-ordered bar slice.
pub fn endpoint_prices(bars: &[RawBar], field: PriceField) -> Option<(f64, f64)> {
    let mut prices = bars.iter().map(|b| b.price(field)).filter(|p| p.is_finite());
    let first = prices.next()?;
    let last = prices.last().unwrap_or(first);
    Some((first, last))
}
