//! Monetary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a value to two decimal places, half away from zero.
///
/// The result always carries a scale of exactly two, so `28075.5` comes
/// back as `28075.50`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_half_up;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let d = |s| Decimal::from_str(s).unwrap();
/// assert_eq!(round_half_up(d("123.454")), d("123.45"));
/// assert_eq!(round_half_up(d("123.455")), d("123.46"));
/// assert_eq!(round_half_up(d("-123.455")), d("-123.46"));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
