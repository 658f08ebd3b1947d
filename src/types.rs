use num_bigint::BigInt;
use num_rational::BigRational;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::money::Cents;

// ---------------------------------------------------------------------------
// Odds notation
// ---------------------------------------------------------------------------

/// How a leg's `odds_value` is quoted.
///
/// Wire values are matched case-insensitively. Anything other than
/// `american` or `decimal` is kept as `Unrecognized` so the validator can
/// reject it against the leg that carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OddsFormat {
    American,
    Decimal,
    Unrecognized(String),
}

impl From<String> for OddsFormat {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "american" => OddsFormat::American,
            "decimal" => OddsFormat::Decimal,
            _ => OddsFormat::Unrecognized(raw),
        }
    }
}

impl From<OddsFormat> for String {
    fn from(format: OddsFormat) -> Self {
        match format {
            OddsFormat::American => "american".to_string(),
            OddsFormat::Decimal => "decimal".to_string(),
            OddsFormat::Unrecognized(raw) => raw,
        }
    }
}

impl std::fmt::Display for OddsFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OddsFormat::American => write!(f, "american"),
            OddsFormat::Decimal => write!(f, "decimal"),
            OddsFormat::Unrecognized(raw) => write!(f, "{raw:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// One selection within a parlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Opaque game reference from the price source. Descriptive only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    /// Market label, e.g. "moneyline" or "total".
    pub market: String,
    /// Chosen outcome, e.g. "NYY" or "Over 8.5".
    pub selection: String,
    #[serde(alias = "odds_type")]
    pub odds_format: OddsFormat,
    #[serde(alias = "odds")]
    pub odds_value: Decimal,
    /// Point spread or total for line-based markets. Never used in arithmetic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Decimal>,
    /// Model win probability for this leg. Falls back to the implied
    /// probability of the quoted price when absent.
    #[serde(default, alias = "leg_probability", skip_serializing_if = "Option::is_none")]
    pub probability: Option<Decimal>,
}

impl Leg {
    pub fn american(market: &str, selection: &str, odds: i64) -> Self {
        Self::new(market, selection, OddsFormat::American, Decimal::from(odds))
    }

    pub fn decimal(market: &str, selection: &str, odds: Decimal) -> Self {
        Self::new(market, selection, OddsFormat::Decimal, odds)
    }

    fn new(market: &str, selection: &str, odds_format: OddsFormat, odds_value: Decimal) -> Self {
        Self {
            game_id: None,
            market: market.to_string(),
            selection: selection.to_string(),
            odds_format,
            odds_value,
            line: None,
            probability: None,
        }
    }

    pub fn with_probability(mut self, probability: Decimal) -> Self {
        self.probability = Some(probability);
        self
    }
}

/// Input to one evaluation. `stake` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParlayRequest {
    #[serde(alias = "stake_cents")]
    pub stake: Cents,
    #[serde(default, alias = "picks")]
    pub legs: Vec<Leg>,
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

/// Canonical price of one leg. Built once by the normalizer, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLeg {
    /// Always > 1.
    pub decimal_odds: BigRational,
    /// `1 / decimal_odds`, strictly inside (0, 1).
    pub implied_probability: BigRational,
    /// Probability the combiner multiplies: the leg's model probability if
    /// one was supplied, otherwise `implied_probability`.
    pub win_probability: BigRational,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Output of one evaluation. Money is in minor units and always goes out
/// as a JSON integer, however large. Odds and probabilities are exact
/// internally and go out as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParlayResult {
    pub leg_count: usize,
    pub stake: Cents,
    #[serde(serialize_with = "wire::ratio")]
    pub combined_decimal_odds: BigRational,
    #[serde(serialize_with = "wire::integer")]
    pub combined_american_odds: BigInt,
    #[serde(serialize_with = "wire::ratio")]
    pub combined_win_probability: BigRational,
    #[serde(serialize_with = "wire::integer")]
    pub potential_payout: BigInt,
    #[serde(serialize_with = "wire::integer")]
    pub potential_profit: BigInt,
    #[serde(serialize_with = "wire::integer")]
    pub expected_value: BigInt,
    pub ev_positive: bool,
}

// ---------------------------------------------------------------------------
// Single-quote conversion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OddsQuote {
    #[serde(alias = "odds_type")]
    pub odds_format: OddsFormat,
    #[serde(alias = "odds")]
    pub odds_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsConversion {
    #[serde(serialize_with = "wire::ratio")]
    pub decimal_odds: BigRational,
    #[serde(serialize_with = "wire::integer")]
    pub american_odds: BigInt,
    #[serde(serialize_with = "wire::ratio")]
    pub implied_probability: BigRational,
}

mod wire {
    use num_bigint::BigInt;
    use num_rational::BigRational;
    use num_traits::ToPrimitive;
    use serde::ser::Error as _;
    use serde::{Serialize, Serializer};
    use serde_json::value::RawValue;

    pub fn ratio<S: Serializer>(value: &BigRational, serializer: S) -> Result<S::Ok, S::Error> {
        match value.to_f64() {
            Some(v) if v.is_finite() => serializer.serialize_f64(v),
            _ => Err(S::Error::custom(format!("{value} is outside the range of a JSON number"))),
        }
    }

    /// Integers past `i64` are written out digit for digit.
    pub fn integer<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        match value.to_i64() {
            Some(v) => serializer.serialize_i64(v),
            None => RawValue::from_string(value.to_string())
                .map_err(S::Error::custom)?
                .serialize(serializer),
        }
    }
}
