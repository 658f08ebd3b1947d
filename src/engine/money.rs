//! Exact arithmetic helpers shared by the engine stages.
//!
//! Odds and probabilities are `BigRational`s, so products over any number of
//! legs stay exact. Money is integer minor units: `Cents` on input, `BigInt`
//! once computed. Rounding happens once, when a rational amount becomes a
//! whole number of minor units or an American display price.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive};
use rust_decimal::Decimal;

use crate::error::EvalError;

/// Integer minor currency units, as accepted on the wire.
pub type Cents = i64;

/// Computed monetary amounts in minor units. Unbounded.
pub type Money = BigInt;

/// Exact rational value of a decimal quote.
pub fn decimal_to_ratio(value: Decimal) -> BigRational {
    let denom = BigInt::from(10u32).pow(value.scale());
    BigRational::new(BigInt::from(value.mantissa()), denom)
}

pub fn cents_to_ratio(amount: Cents) -> BigRational {
    BigRational::from_integer(BigInt::from(amount))
}

pub fn money_to_ratio(amount: &Money) -> BigRational {
    BigRational::from_integer(amount.clone())
}

/// Round half up by magnitude: 0.5 -> 1, -0.5 -> -1.
pub fn round_half_up(value: &BigRational) -> BigInt {
    value.round().to_integer()
}

/// Multiply every factor together. The first factor seeds the fold, so a
/// single factor comes back exactly as given. `None` for no factors.
pub fn product<'a, I>(factors: I) -> Option<BigRational>
where
    I: IntoIterator<Item = &'a BigRational>,
{
    let mut iter = factors.into_iter();
    let first = iter.next()?.clone();
    Some(iter.fold(first, |acc, f| acc * f.clone()))
}

/// Odds and probabilities go over the wire as JSON numbers. Anything that
/// would not survive that conversion as a finite, non-zero value is refused.
pub fn ensure_wire_representable(value: &BigRational, stage: &'static str) -> Result<(), EvalError> {
    match value.to_f64() {
        Some(v) if v.is_finite() && v > 0.0 => Ok(()),
        _ => Err(EvalError::overflow(stage)),
    }
}

pub fn hundred() -> BigRational {
    BigRational::from_integer(BigInt::from(100))
}

pub fn one() -> BigRational {
    BigRational::one()
}
