//! HTTP API handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::arbitrage::{compute, render, AllocationResult, CalculationOutcome};
use crate::metrics;

/// Application state shared with handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// Prometheus scrape handle, absent when no recorder is installed.
    pub metrics: Option<PrometheusHandle>,
    /// Calculations served since startup.
    pub calculations: Arc<AtomicU64>,
}

impl AppState {
    /// Create new app state.
    pub fn new(metrics: Option<PrometheusHandle>) -> Self {
        Self {
            metrics,
            calculations: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of calculations served.
    pub fn calculations_served(&self) -> u64 {
        self.calculations.load(Ordering::Relaxed)
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Calculations served since startup.
    pub calculations_served: u64,
}

/// Calculation request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CalculateRequest {
    /// Number of outcomes; defaults to the number of odds entries.
    #[serde(default)]
    pub outcomes: Option<usize>,
    /// Raw odds text per outcome, e.g. `["2.5", "1.8"]`.
    pub odds: Vec<String>,
    /// Raw total stake text, e.g. `"100"`.
    pub stake: String,
}

/// One outcome of a successful allocation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LegResponse {
    /// 1-based outcome index.
    pub outcome: usize,
    /// Odds for this outcome.
    pub odds: String,
    /// Amount to wager.
    pub stake: String,
    /// Return if this outcome wins.
    pub payout: String,
}

/// A successful allocation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AllocationResponse {
    /// Per-outcome legs in input order.
    pub legs: Vec<LegResponse>,
    /// Total stake distributed.
    pub total_stake: String,
    /// Worst-case payout minus total stake.
    pub guaranteed_profit: String,
    /// Guaranteed profit as a percentage of stake; absent when out of range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi_pct: Option<String>,
}

/// Calculation response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalculateResponse {
    /// One of `success`, `no_arbitrage`, `invalid_input`.
    pub status: String,
    /// Rendered user-facing text.
    pub message: String,
    /// Sum of 1/odds, when the odds were valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse_sum: Option<String>,
    /// Allocation, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation: Option<AllocationResponse>,
    /// Machine-readable rejection reason, on invalid input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Human-readable rejection detail, on invalid input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

fn decimal_str(value: Decimal) -> String {
    value.normalize().to_string()
}

impl From<&AllocationResult> for AllocationResponse {
    fn from(result: &AllocationResult) -> Self {
        Self {
            legs: result
                .legs
                .iter()
                .map(|leg| LegResponse {
                    outcome: leg.outcome,
                    odds: decimal_str(leg.odds),
                    stake: decimal_str(leg.stake),
                    payout: decimal_str(leg.payout),
                })
                .collect(),
            total_stake: decimal_str(result.total_stake),
            guaranteed_profit: decimal_str(result.guaranteed_profit),
            roi_pct: result.roi().map(decimal_str),
        }
    }
}

impl From<&CalculationOutcome> for CalculateResponse {
    fn from(outcome: &CalculationOutcome) -> Self {
        let mut response = Self {
            status: outcome.kind().to_string(),
            message: render(outcome),
            inverse_sum: None,
            allocation: None,
            reason: None,
            detail: None,
        };

        match outcome {
            CalculationOutcome::Success(result) => {
                response.inverse_sum = Some(decimal_str(result.inverse_sum));
                response.allocation = Some(AllocationResponse::from(result));
            }
            CalculationOutcome::NoArbitrage { inverse_sum } => {
                response.inverse_sum = Some(decimal_str(*inverse_sum));
            }
            CalculationOutcome::InvalidInput(reason) => {
                let code: &str = reason.as_ref();
                response.reason = Some(code.to_string());
                response.detail = Some(reason.to_string());
            }
        }

        response
    }
}

/// OpenAPI document for the calculator API.
#[derive(OpenApi)]
#[openapi(
    paths(calculate),
    components(schemas(CalculateRequest, CalculateResponse, AllocationResponse, LegResponse))
)]
pub struct ApiDoc;

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Status handler - returns service status and counters.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    Json(StatusResponse {
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        calculations_served: state.calculations_served(),
    })
}

/// Calculate an arbitrage allocation.
///
/// Invalid input is a calculation outcome, so it is answered with 200 and
/// `status = "invalid_input"`.
#[utoipa::path(
    post,
    path = "/api/v1/calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Calculation outcome", body = CalculateResponse)
    )
)]
pub async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<CalculateRequest>,
) -> impl IntoResponse {
    let start = Instant::now();

    let outcomes = request.outcomes.unwrap_or(request.odds.len());
    let outcome = compute(outcomes, &request.odds, &request.stake);
    state.calculations.fetch_add(1, Ordering::Relaxed);

    let response = CalculateResponse::from(&outcome);
    metrics::record_http_latency(start, "calculate");
    Json(response)
}

/// Prometheus scrape handler.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// Serve the OpenAPI document.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
