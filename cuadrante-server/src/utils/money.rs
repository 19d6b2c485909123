//! Decimal helpers for monetary values
//!
//! Revenue averages are computed with `Decimal` internally and converted
//! back to `f64` for serialization, rounded to 2 decimal places.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round an f64 to 2 decimal places via exact decimal arithmetic
#[inline]
pub fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}
