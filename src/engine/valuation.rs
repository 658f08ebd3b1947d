use num_traits::Signed;

use crate::engine::combiner::CombinedPrice;
use crate::engine::money::{cents_to_ratio, money_to_ratio, one, round_half_up, Cents, Money};
use crate::error::EvalError;

/// Payout projection for one stake at one combined price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Valuation {
    pub potential_payout: Money,
    pub potential_profit: Money,
    pub expected_value: Money,
    pub ev_positive: bool,
}

/// Payout and EV are each rounded exactly once, here.
/// EV is taken over the already-rounded profit so that it agrees with the
/// payout the bettor is actually shown.
pub fn value(stake: Cents, price: &CombinedPrice) -> Result<Valuation, EvalError> {
    let stake_ratio = cents_to_ratio(stake);

    let potential_payout = round_half_up(&(stake_ratio.clone() * &price.decimal_odds));
    let potential_profit = &potential_payout - stake;

    let p = &price.win_probability;
    let win_leg = p * money_to_ratio(&potential_profit);
    let lose_leg = (one() - p) * stake_ratio;
    let expected_value = round_half_up(&(win_leg - lose_leg));
    let ev_positive = expected_value.is_positive();

    Ok(Valuation {
        potential_payout,
        potential_profit,
        expected_value,
        ev_positive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::money::decimal_to_ratio;
    use num_bigint::BigInt;
    use num_rational::BigRational;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn price(decimal_odds: Decimal, win_probability: Decimal) -> CombinedPrice {
        CombinedPrice {
            decimal_odds: decimal_to_ratio(decimal_odds),
            american_odds: BigInt::from(0),
            win_probability: decimal_to_ratio(win_probability),
        }
    }

    fn cents(v: i64) -> Money {
        BigInt::from(v)
    }

    #[test]
    fn two_leg_projection() {
        let v = value(1000, &price(dec!(3.315), dec!(0.33))).unwrap();
        assert_eq!(v.potential_payout, cents(3315));
        assert_eq!(v.potential_profit, cents(2315));
        assert_eq!(v.expected_value, cents(94));
        assert!(v.ev_positive);
    }

    #[test]
    fn fair_price_has_zero_ev() {
        let v = value(1000, &price(dec!(2), dec!(0.5))).unwrap();
        assert_eq!(v.potential_payout, cents(2000));
        assert_eq!(v.potential_profit, cents(1000));
        assert_eq!(v.expected_value, cents(0));
        assert!(!v.ev_positive);
    }

    #[test]
    fn payout_rounds_half_up_once() {
        // 1005 * 1.5 = 1507.5
        let v = value(1005, &price(dec!(1.5), dec!(0.6))).unwrap();
        assert_eq!(v.potential_payout, cents(1508));
        assert_eq!(v.potential_profit, cents(503));
    }

    #[test]
    fn losing_proposition_is_negative() {
        let v = value(1000, &price(dec!(1.9090909090909090909090909091), dec!(0.45))).unwrap();
        assert_eq!(v.potential_payout, cents(1909));
        assert!(v.expected_value < cents(0));
        assert!(!v.ev_positive);
    }

    #[test]
    fn profit_is_payout_minus_stake() {
        for stake in [1, 7, 99, 1000, 123_456] {
            for odds in [dec!(1.01), dec!(1.7407407407407407407407407407), dec!(3.315), dec!(250)] {
                let v = value(stake, &price(odds, dec!(0.3))).unwrap();
                assert_eq!(v.potential_profit, &v.potential_payout - stake);
                assert_eq!(v.ev_positive, v.expected_value > cents(0));
            }
        }
    }

    #[test]
    fn payout_past_i64_is_exact() {
        let odds = BigRational::from_integer(BigInt::from(10u32).pow(60));
        let price = CombinedPrice {
            decimal_odds: odds,
            american_odds: BigInt::from(0),
            win_probability: BigRational::new(BigInt::from(1), BigInt::from(2u32).pow(20)),
        };
        let v = value(i64::MAX, &price).unwrap();
        let expected_payout = BigInt::from(i64::MAX) * BigInt::from(10u32).pow(60);
        assert_eq!(v.potential_profit, &expected_payout - i64::MAX);
        assert_eq!(v.potential_payout, expected_payout);
        assert!(v.ev_positive);
    }
}
