//! Calculator entry point: validate raw input, then allocate.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::calculator::{allocate, margin_pct, CalculationOutcome};
use super::input::validate;
use crate::metrics;

/// One calculator request as entered by a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalculationRequest {
    /// Declared number of outcomes (2 to 4).
    pub outcomes: usize,
    /// Raw odds text, one entry per outcome.
    pub odds: Vec<String>,
    /// Raw total stake text.
    pub stake: String,
}

impl CalculationRequest {
    /// Build a request from borrowed text.
    pub fn new<S: AsRef<str>>(outcomes: usize, odds: &[S], stake: &str) -> Self {
        Self {
            outcomes,
            odds: odds.iter().map(|s| s.as_ref().to_string()).collect(),
            stake: stake.to_string(),
        }
    }

    /// Run the calculation for this request.
    pub fn compute(&self) -> CalculationOutcome {
        compute(self.outcomes, &self.odds, &self.stake)
    }
}

fn pct_field(value: Option<Decimal>) -> String {
    value
        .map(|v| v.round_dp(4).to_string())
        .unwrap_or_else(|| "out of range".to_string())
}

/// Validate raw input and compute the arbitrage allocation.
///
/// Never panics; every failure is folded into the returned outcome.
#[instrument(skip(odds_inputs, stake_input))]
pub fn compute<S: AsRef<str>>(
    outcome_count: usize,
    odds_inputs: &[S],
    stake_input: &str,
) -> CalculationOutcome {
    let _timer = metrics::timer_calculation();

    let outcome = match validate(outcome_count, odds_inputs, stake_input) {
        Ok(input) => allocate(&input.odds, input.stake),
        Err(e) => CalculationOutcome::InvalidInput(e),
    };

    match &outcome {
        CalculationOutcome::Success(result) => info!(
            inverse_sum = %result.inverse_sum,
            guaranteed_profit = %result.guaranteed_profit,
            roi_pct = %pct_field(result.roi()),
            "Arbitrage opportunity found"
        ),
        CalculationOutcome::NoArbitrage { inverse_sum } => debug!(
            inverse_sum = %inverse_sum,
            margin_pct = %pct_field(margin_pct(*inverse_sum)),
            "No arbitrage opportunity"
        ),
        CalculationOutcome::InvalidInput(reason) => {
            let code: &str = reason.as_ref();
            debug!(reason = code, detail = %reason, "Invalid calculator input");
        }
    }

    metrics::inc_calculations(outcome.kind());
    outcome
}
