use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::api::health::HealthState;
use crate::api::latency::LatencyStats;
use crate::engine::{self, normalizer};
use crate::error::{AppError, EvalError};
use crate::types::{OddsConversion, OddsQuote, ParlayRequest, ParlayResult};

#[derive(Clone)]
pub struct ApiState {
    pub health: Arc<HealthState>,
    pub latency: Arc<LatencyStats>,
    pub max_legs: usize,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/v1/parlay/evaluate", post(evaluate_parlay))
        .route("/v1/parlay/build", post(evaluate_parlay))
        .route("/v1/odds/convert", post(convert_odds))
        .route("/health", get(get_health))
        .route("/stats/latency", get(get_stats_latency))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub evaluations: u64,
    pub rejections: u64,
}

#[derive(Serialize)]
pub struct LatencyResponse {
    pub samples: u64,
    pub p50_us: Option<u64>,
    pub p95_us: Option<u64>,
    pub p99_us: Option<u64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn evaluate_parlay(
    State(state): State<ApiState>,
    payload: Result<Json<ParlayRequest>, JsonRejection>,
) -> Result<Json<ParlayResult>, AppError> {
    let outcome = run_evaluation(&state, payload);
    match &outcome {
        Ok(result) => {
            state.health.inc_evaluations();
            info!(
                event = "PARLAY_EVALUATED",
                legs = result.leg_count,
                stake = result.stake,
                payout = %result.potential_payout,
                ev = %result.expected_value,
                "parlay evaluated | legs: {} | odds: {} ({:+}) | payout: {} | ev: {}",
                result.leg_count,
                result.combined_decimal_odds,
                result.combined_american_odds,
                result.potential_payout,
                result.expected_value,
            );
        }
        Err(e) => {
            state.health.inc_rejections();
            warn!(event = "PARLAY_REJECTED", "parlay rejected: {e}");
        }
    }
    outcome.map(Json)
}

fn run_evaluation(
    state: &ApiState,
    payload: Result<Json<ParlayRequest>, JsonRejection>,
) -> Result<ParlayResult, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Payload(e.body_text()))?;
    if request.legs.len() > state.max_legs {
        return Err(EvalError::invalid_request(format!(
            "{} legs exceeds the limit of {}",
            request.legs.len(),
            state.max_legs
        ))
        .into());
    }

    let started = Instant::now();
    let result = engine::evaluate(&request);
    state.latency.record(started.elapsed());
    Ok(result?)
}

async fn convert_odds(
    payload: Result<Json<OddsQuote>, JsonRejection>,
) -> Result<Json<OddsConversion>, AppError> {
    let Json(quote) = payload.map_err(|e| AppError::Payload(e.body_text()))?;
    let conversion = normalizer::convert(&quote.odds_format, quote.odds_value)?;
    Ok(Json(conversion))
}

async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.health.uptime_secs(),
        evaluations: state.health.evaluations(),
        rejections: state.health.rejections(),
    })
}

async fn get_stats_latency(State(state): State<ApiState>) -> Json<LatencyResponse> {
    let (p50_us, p95_us, p99_us) = state.latency.percentiles();
    Json(LatencyResponse {
        samples: state.latency.len(),
        p50_us,
        p95_us,
        p99_us,
    })
}
