//! Shared money helpers for the bracket calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a money value to `dp` decimal places, halves away from zero.
///
/// The evaluator never rounds; this is for presenting results.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(14999.9995), 0), dec!(15000));
/// assert_eq!(round_half_up(dec!(123.455), 2), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-0.5), 0), dec!(-1));
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to whole currency units for display.
pub fn round_whole(value: Decimal) -> Decimal {
    round_half_up(value, 0)
}

/// Clamps negative amounts to zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(-50000)), dec!(0));
/// assert_eq!(floor_at_zero(dec!(700000)), dec!(700000));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    if value > Decimal::ZERO { value } else { Decimal::ZERO }
}
