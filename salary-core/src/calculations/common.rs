//! Shared helpers for salary calculations.
//!
//! The calculator itself never rounds intermediate values; these helpers
//! exist for display amounts and for callers that persist rounded figures.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Standard financial rounding: values at exactly 0.005 round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1833.334)), dec!(1833.33));
/// assert_eq!(round_half_up(dec!(1833.335)), dec!(1833.34));
/// assert_eq!(round_half_up(dec!(-1833.335)), dec!(-1833.34)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
