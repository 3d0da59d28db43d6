//! Currency rounding shared by every calculation stage.
//!
//! All stages round to whole currency units with round-half-up. Amounts are
//! non-negative wherever rounding is applied, so rounding the midpoint away
//! from zero is the same as rounding it up.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to whole currency units, half-up.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("520.5").unwrap()), Decimal::from(521));
/// assert_eq!(round_currency(Decimal::from_str("520.49").unwrap()), Decimal::from(520));
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `rate` percent of `value`, unrounded.
pub fn percent_of(value: Decimal, rate: Decimal) -> Decimal {
    value * rate / Decimal::ONE_HUNDRED
}
