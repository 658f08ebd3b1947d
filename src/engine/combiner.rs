use num_bigint::BigInt;
use num_rational::BigRational;

use crate::engine::money::product;
use crate::engine::normalizer::decimal_to_american;
use crate::error::EvalError;
use crate::types::NormalizedLeg;

/// One combined price for a whole parlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedPrice {
    pub decimal_odds: BigRational,
    pub american_odds: BigInt,
    pub win_probability: BigRational,
}

/// How leg probabilities fold into the probability that every leg wins.
///
/// `Independent` is the only model shipped. A correlation-aware model
/// plugs in here without touching odds combination.
pub trait JointProbability {
    fn joint_probability(&self, legs: &[NormalizedLeg]) -> Result<BigRational, EvalError>;
}

/// Legs are treated as statistically independent events.
#[derive(Debug, Clone, Copy, Default)]
pub struct Independent;

impl JointProbability for Independent {
    fn joint_probability(&self, legs: &[NormalizedLeg]) -> Result<BigRational, EvalError> {
        product(legs.iter().map(|l| &l.win_probability))
            .ok_or_else(|| EvalError::invalid_request("no legs to combine"))
    }
}

pub fn combine(legs: &[NormalizedLeg]) -> Result<CombinedPrice, EvalError> {
    combine_with(legs, &Independent)
}

pub fn combine_with<M: JointProbability>(
    legs: &[NormalizedLeg],
    model: &M,
) -> Result<CombinedPrice, EvalError> {
    let decimal_odds = product(legs.iter().map(|l| &l.decimal_odds))
        .ok_or_else(|| EvalError::invalid_request("no legs to combine"))?;
    let win_probability = model.joint_probability(legs)?;

    Ok(CombinedPrice {
        american_odds: decimal_to_american(&decimal_odds)?,
        decimal_odds,
        win_probability,
    })
}
