use rust_decimal::Decimal;

use crate::engine::normalizer::is_valid_american;
use crate::error::{EvalError, LegViolation};
use crate::types::{Leg, OddsFormat, ParlayRequest};

/// Reject the request on its first violation: request-level checks first,
/// then legs in order.
pub fn validate(request: &ParlayRequest) -> Result<(), EvalError> {
    if request.stake <= 0 {
        return Err(EvalError::invalid_request(format!(
            "stake must be a positive number of minor units, got {}",
            request.stake
        )));
    }
    if request.legs.is_empty() {
        return Err(EvalError::invalid_request("at least one leg is required"));
    }
    for (index, leg) in request.legs.iter().enumerate() {
        validate_leg(leg).map_err(|reason| EvalError::InvalidLeg { index, reason })?;
    }
    Ok(())
}

pub fn validate_leg(leg: &Leg) -> Result<(), LegViolation> {
    if leg.market.trim().is_empty() {
        return Err(LegViolation::EmptyMarket);
    }
    if leg.selection.trim().is_empty() {
        return Err(LegViolation::EmptySelection);
    }
    match &leg.odds_format {
        OddsFormat::American => {
            if !is_valid_american(leg.odds_value) {
                return Err(LegViolation::AmericanInForbiddenBand(leg.odds_value));
            }
            if !leg.odds_value.fract().is_zero() {
                return Err(LegViolation::AmericanNotWhole(leg.odds_value));
            }
        }
        OddsFormat::Decimal => {
            if leg.odds_value <= Decimal::ONE {
                return Err(LegViolation::DecimalNotAboveOne(leg.odds_value));
            }
        }
        other @ OddsFormat::Unrecognized(_) => {
            return Err(LegViolation::UnrecognizedFormat(other.clone()));
        }
    }
    if let Some(p) = leg.probability {
        if p <= Decimal::ZERO || p >= Decimal::ONE {
            return Err(LegViolation::ProbabilityOutOfRange(p));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(legs: Vec<Leg>) -> ParlayRequest {
        ParlayRequest { stake: 1000, legs }
    }

    #[test]
    fn accepts_well_formed_request() {
        let req = request(vec![
            Leg::american("ML", "NYY", -135),
            Leg::decimal("Total", "Over 8.5", dec!(1.95)).with_probability(dec!(0.55)),
        ]);
        assert_eq!(validate(&req), Ok(()));
    }

    #[test]
    fn empty_legs_is_invalid_request() {
        for stake in [1, 1000, 0] {
            let req = ParlayRequest { stake, legs: vec![] };
            assert!(matches!(validate(&req), Err(EvalError::InvalidRequest { .. })));
        }
    }

    #[test]
    fn non_positive_stake_is_invalid_request() {
        for stake in [0, -500] {
            let req = ParlayRequest { stake, legs: vec![Leg::american("ML", "NYY", 120)] };
            assert!(matches!(validate(&req), Err(EvalError::InvalidRequest { .. })));
        }
    }

    #[test]
    fn american_inside_band_names_the_leg() {
        let req = request(vec![
            Leg::american("ML", "NYY", -135),
            Leg::american("ML", "BOS", 50),
        ]);
        assert_eq!(
            validate(&req),
            Err(EvalError::InvalidLeg {
                index: 1,
                reason: LegViolation::AmericanInForbiddenBand(dec!(50)),
            })
        );
    }

    #[test]
    fn band_edges() {
        for bad in [0, 99, -99, 1, -1] {
            assert_eq!(
                validate_leg(&Leg::american("ML", "X", bad)),
                Err(LegViolation::AmericanInForbiddenBand(Decimal::from(bad)))
            );
        }
        for good in [100, -100, 101, -101] {
            assert_eq!(validate_leg(&Leg::american("ML", "X", good)), Ok(()));
        }
    }

    #[test]
    fn fractional_american_is_rejected() {
        let mut leg = Leg::american("ML", "X", 0);
        leg.odds_value = dec!(-110.5);
        assert_eq!(validate_leg(&leg), Err(LegViolation::AmericanNotWhole(dec!(-110.5))));
    }

    #[test]
    fn fractional_value_short_of_a_hundred_is_in_the_band() {
        let mut leg = Leg::american("ML", "X", 0);
        leg.odds_value = dec!(99.5);
        let reason = validate_leg(&leg).unwrap_err();
        assert_eq!(reason, LegViolation::AmericanInForbiddenBand(dec!(99.5)));
        assert_eq!(reason.to_string(), "american odds 99.5 are closer to even than ±100");
    }

    #[test]
    fn decimal_must_exceed_one() {
        assert_eq!(
            validate_leg(&Leg::decimal("ML", "X", dec!(1.0))),
            Err(LegViolation::DecimalNotAboveOne(dec!(1.0)))
        );
        assert_eq!(validate_leg(&Leg::decimal("ML", "X", dec!(1.01))), Ok(()));
    }

    #[test]
    fn blank_labels_are_rejected() {
        assert_eq!(
            validate_leg(&Leg::american("  ", "X", 120)),
            Err(LegViolation::EmptyMarket)
        );
        assert_eq!(
            validate_leg(&Leg::american("ML", "\t", 120)),
            Err(LegViolation::EmptySelection)
        );
    }

    #[test]
    fn unrecognized_format_is_a_leg_error() {
        let mut leg = Leg::decimal("ML", "X", dec!(2.5));
        leg.odds_format = OddsFormat::Unrecognized("fractional".into());
        assert!(matches!(validate_leg(&leg), Err(LegViolation::UnrecognizedFormat(_))));
    }

    #[test]
    fn probability_must_be_strictly_inside_unit_interval() {
        for p in [dec!(0), dec!(1), dec!(1.2), dec!(-0.1)] {
            let leg = Leg::decimal("ML", "X", dec!(2)).with_probability(p);
            assert_eq!(validate_leg(&leg), Err(LegViolation::ProbabilityOutOfRange(p)));
        }
    }

    #[test]
    fn first_failing_leg_wins() {
        let req = request(vec![
            Leg::american("ML", "A", 120),
            Leg::decimal("ML", "B", dec!(0.9)),
            Leg::american("", "C", 10),
        ]);
        assert!(matches!(validate(&req), Err(EvalError::InvalidLeg { index: 1, .. })));
    }
}
