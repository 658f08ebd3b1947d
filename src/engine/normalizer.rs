use num_bigint::BigInt;
use num_rational::BigRational;
use rust_decimal::Decimal;

use crate::engine::money::{decimal_to_ratio, hundred, one, round_half_up};
use crate::error::EvalError;
use crate::types::{Leg, NormalizedLeg, OddsConversion, OddsFormat};

/// American prices closer to even than this are never quoted.
pub const MIN_AMERICAN_MAGNITUDE: i64 = 100;

/// Convert a leg's price to decimal odds plus its implied probability.
/// A supplied model probability replaces the implied one as the leg's
/// win probability.
pub fn normalize(leg: &Leg) -> Result<NormalizedLeg, EvalError> {
    let (decimal_odds, implied_probability) = price(&leg.odds_format, leg.odds_value)?;
    let win_probability = match leg.probability {
        Some(p) => decimal_to_ratio(p),
        None => implied_probability.clone(),
    };
    Ok(NormalizedLeg {
        decimal_odds,
        implied_probability,
        win_probability,
    })
}

/// Convert one quote into every representation the service exposes.
pub fn convert(format: &OddsFormat, value: Decimal) -> Result<OddsConversion, EvalError> {
    let (decimal_odds, implied_probability) = price(format, value)?;
    Ok(OddsConversion {
        american_odds: decimal_to_american(&decimal_odds)?,
        decimal_odds,
        implied_probability,
    })
}

fn price(format: &OddsFormat, value: Decimal) -> Result<(BigRational, BigRational), EvalError> {
    match format {
        OddsFormat::American => {
            let decimal_odds = american_to_decimal(value)?;
            Ok((decimal_odds, american_implied_probability(value)))
        }
        OddsFormat::Decimal => {
            if value <= Decimal::ONE {
                return Err(invalid(format, value));
            }
            let decimal_odds = decimal_to_ratio(value);
            let implied = decimal_odds.recip();
            Ok((decimal_odds, implied))
        }
        OddsFormat::Unrecognized(_) => Err(invalid(format, value)),
    }
}

/// `+a` pays `a` per 100 staked; `-a` needs `a` staked to win 100.
pub fn american_to_decimal(american: Decimal) -> Result<BigRational, EvalError> {
    if !is_valid_american(american) {
        return Err(invalid(&OddsFormat::American, american));
    }
    let a = decimal_to_ratio(american);
    let profit_per_unit = if american.is_sign_positive() {
        a / hundred()
    } else {
        hundred() / -a
    };
    Ok(one() + profit_per_unit)
}

/// `100/(a+100)` for underdogs, `|a|/(|a|+100)` for favourites.
fn american_implied_probability(american: Decimal) -> BigRational {
    let magnitude = decimal_to_ratio(american.abs());
    let numerator = if american.is_sign_positive() {
        hundred()
    } else {
        magnitude.clone()
    };
    numerator / (magnitude + hundred())
}

/// Display price for decimal odds. Even money (2.0) renders as +100.
pub fn decimal_to_american(decimal_odds: &BigRational) -> Result<BigInt, EvalError> {
    if *decimal_odds <= one() {
        return Err(EvalError::InvalidOdds {
            format: OddsFormat::Decimal,
            value: decimal_odds.to_string(),
        });
    }
    let profit_per_unit = decimal_odds.clone() - one();
    let american = if *decimal_odds >= BigRational::from_integer(BigInt::from(2)) {
        profit_per_unit * hundred()
    } else {
        -(hundred() / profit_per_unit)
    };
    Ok(round_half_up(&american))
}

pub fn is_valid_american(american: Decimal) -> bool {
    american.abs() >= Decimal::from(MIN_AMERICAN_MAGNITUDE)
}

fn invalid(format: &OddsFormat, value: Decimal) -> EvalError {
    EvalError::InvalidOdds {
        format: format.clone(),
        value: value.to_string(),
    }
}
