use axum::{http::StatusCode, response::IntoResponse, Json};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::types::OddsFormat;

/// Why a single leg was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LegViolation {
    #[error("market is empty")]
    EmptyMarket,

    #[error("selection is empty")]
    EmptySelection,

    #[error("odds format {0} is not recognized")]
    UnrecognizedFormat(OddsFormat),

    #[error("american odds {0} are closer to even than ±100")]
    AmericanInForbiddenBand(Decimal),

    #[error("american odds {0} must be a whole number")]
    AmericanNotWhole(Decimal),

    #[error("decimal odds {0} must be greater than 1.0")]
    DecimalNotAboveOne(Decimal),

    #[error("probability {0} must lie strictly between 0 and 1")]
    ProbabilityOutOfRange(Decimal),
}

/// Engine failures. Every variant is terminal for the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("invalid leg {index}: {reason}")]
    InvalidLeg { index: usize, reason: LegViolation },

    #[error("invalid odds: {value} is not a valid {format} price")]
    InvalidOdds { format: OddsFormat, value: String },

    #[error("arithmetic overflow while computing {stage}")]
    ArithmeticOverflow { stage: &'static str },
}

impl EvalError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        EvalError::InvalidRequest { reason: reason.into() }
    }

    pub fn overflow(stage: &'static str) -> Self {
        EvalError::ArithmeticOverflow { stage }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::InvalidRequest { .. } => "invalid_request",
            EvalError::InvalidLeg { .. } => "invalid_leg",
            EvalError::InvalidOdds { .. } => "invalid_odds",
            EvalError::ArithmeticOverflow { .. } => "arithmetic_overflow",
        }
    }

    pub fn leg_index(&self) -> Option<usize> {
        match self {
            EvalError::InvalidLeg { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("Malformed payload: {0}")]
    Payload(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    leg_index: Option<usize>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, kind, leg_index) = match &self {
            AppError::Eval(e @ EvalError::ArithmeticOverflow { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.kind(), None)
            }
            AppError::Eval(e) => (StatusCode::BAD_REQUEST, e.kind(), e.leg_index()),
            AppError::Payload(_) => (StatusCode::BAD_REQUEST, "invalid_request", None),
            AppError::Config(_) | AppError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", None)
            }
        };
        let body = ErrorBody {
            error: kind,
            message: self.to_string(),
            leg_index,
        };
        (status, Json(body)).into_response()
    }
}
