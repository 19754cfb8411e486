//! Common utility functions for pay calculations.
//!
//! This module provides shared functionality used by the paycheck calculator
//! and by hosts formatting its output.

use rust_decimal::Decimal;

/// Weeks in the steady-state pay year.
pub const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Months in a year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Hours in a week; the upper bound for `hours_per_week`.
pub const HOURS_PER_WEEK_MAX: Decimal = Decimal::from_parts(168, 0, 0, false, 0);

/// One hundred, for percentage conversions.
pub const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero). The engine itself never
/// rounds; this is for display.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pay_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Expresses `part` as a percentage of `whole`, or zero when `whole` is zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pay_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(25), dec!(200)), dec!(12.5));
/// assert_eq!(percent_of(dec!(25), dec!(0)), dec!(0));
/// ```
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * ONE_HUNDRED
    }
}
