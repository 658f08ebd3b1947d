//! Parlay evaluation: validate, normalize each leg, combine, value.
//!
//! Every function here is pure and synchronous. Nothing is cached between
//! calls and input legs are only ever borrowed.

pub mod combiner;
pub mod money;
pub mod normalizer;
pub mod validator;
pub mod valuation;

use tracing::debug;

use crate::error::EvalError;
use crate::types::{NormalizedLeg, ParlayRequest, ParlayResult};

pub fn evaluate(request: &ParlayRequest) -> Result<ParlayResult, EvalError> {
    validator::validate(request)?;

    let legs = request
        .legs
        .iter()
        .map(normalizer::normalize)
        .collect::<Result<Vec<NormalizedLeg>, EvalError>>()?;

    let price = combiner::combine(&legs)?;
    money::ensure_wire_representable(&price.decimal_odds, "combined odds")?;
    money::ensure_wire_representable(&price.win_probability, "combined probability")?;
    let valuation = valuation::value(request.stake, &price)?;

    debug!(
        legs = legs.len(),
        combined_decimal_odds = %price.decimal_odds,
        combined_win_probability = %price.win_probability,
        payout = %valuation.potential_payout,
        ev = %valuation.expected_value,
        "parlay evaluated"
    );

    Ok(ParlayResult {
        leg_count: request.legs.len(),
        stake: request.stake,
        combined_decimal_odds: price.decimal_odds,
        combined_american_odds: price.american_odds,
        combined_win_probability: price.win_probability,
        potential_payout: valuation.potential_payout,
        potential_profit: valuation.potential_profit,
        expected_value: valuation.expected_value,
        ev_positive: valuation.ev_positive,
    })
}
