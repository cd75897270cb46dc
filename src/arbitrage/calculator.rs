//! Stake allocation and profit calculations for arbitrage opportunities.

use rust_decimal::Decimal;
use smallvec::SmallVec;

use super::input::{OddsSet, MAX_OUTCOMES};
use crate::error::InputError;

/// Fractional digits the inverse-odds sum is rounded to before the
/// opportunity test. Absorbs the truncation residue of repeating quotients
/// such as 3 × 1/3.
pub const DECISION_SCALE: u32 = 20;

/// Stake and payout for one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    /// 1-based outcome index.
    pub outcome: usize,
    /// Decimal odds for this outcome.
    pub odds: Decimal,
    /// Amount to wager on this outcome.
    pub stake: Decimal,
    /// Return if this outcome wins (stake * odds).
    pub payout: Decimal,
}

/// Guaranteed-profit allocation across all outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationResult {
    /// One leg per outcome, in input order.
    pub legs: SmallVec<[Leg; MAX_OUTCOMES]>,
    /// Total stake distributed across legs.
    pub total_stake: Decimal,
    /// Sum of 1/odds over all outcomes.
    pub inverse_sum: Decimal,
    /// Worst-case payout minus total stake.
    pub guaranteed_profit: Decimal,
}

impl AllocationResult {
    /// Smallest payout across outcomes.
    pub fn min_payout(&self) -> Decimal {
        self.payouts().min().unwrap_or_default()
    }

    /// Guaranteed profit as a percentage of total stake.
    ///
    /// `None` when the percentage exceeds the decimal range.
    pub fn roi(&self) -> Option<Decimal> {
        if self.total_stake.is_zero() {
            return Some(Decimal::ZERO);
        }
        self.guaranteed_profit
            .checked_div(self.total_stake)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }

    /// Per-outcome stakes in outcome order.
    pub fn stakes(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.legs.iter().map(|l| l.stake)
    }

    /// Per-outcome payouts in outcome order.
    pub fn payouts(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.legs.iter().map(|l| l.payout)
    }
}

/// Result of one calculation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculationOutcome {
    /// A risk-free allocation exists.
    Success(AllocationResult),
    /// Inverse-odds sum is 1 or more.
    NoArbitrage {
        /// Sum of 1/odds that failed the test.
        inverse_sum: Decimal,
    },
    /// The request could not be evaluated.
    InvalidInput(InputError),
}

/// Discriminant of [`CalculationOutcome`], used for labels and status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum OutcomeKind {
    /// Allocation found.
    Success,
    /// No opportunity.
    NoArbitrage,
    /// Rejected input.
    InvalidInput,
}

impl CalculationOutcome {
    /// Which variant this is.
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success(_) => OutcomeKind::Success,
            Self::NoArbitrage { .. } => OutcomeKind::NoArbitrage,
            Self::InvalidInput(_) => OutcomeKind::InvalidInput,
        }
    }

    /// The allocation, if one was found.
    pub fn allocation(&self) -> Option<&AllocationResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    /// Whether a guaranteed-profit allocation was found.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Sum of 1/odds over all outcomes.
pub fn inverse_sum(odds: &OddsSet) -> Result<Decimal, InputError> {
    odds.iter().try_fold(Decimal::ZERO, |acc, o| {
        Decimal::ONE
            .checked_div(*o)
            .and_then(|inv| acc.checked_add(inv))
            .ok_or(InputError::OutOfRange)
    })
}

/// Whether an inverse-odds sum leaves room for a guaranteed profit.
///
/// Strictly below 1; a sum of exactly 1 only breaks even.
pub fn is_opportunity(inverse_sum: Decimal) -> bool {
    inverse_sum.round_dp(DECISION_SCALE) < Decimal::ONE
}

/// Bookmaker margin in percent: (inverse_sum - 1) * 100.
///
/// Negative when an arbitrage opportunity exists; `None` when the
/// percentage exceeds the decimal range.
pub fn margin_pct(inverse_sum: Decimal) -> Option<Decimal> {
    inverse_sum
        .checked_sub(Decimal::ONE)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Allocate `stake` across outcomes so every outcome pays the same.
///
/// Each outcome receives `(stake / odds_i) / inverse_sum`. The guaranteed
/// profit uses the true minimum payout rather than the ideal equal payout.
pub fn allocate(odds: &OddsSet, stake: Decimal) -> CalculationOutcome {
    match try_allocate(odds, stake) {
        Ok(outcome) => outcome,
        Err(e) => CalculationOutcome::InvalidInput(e),
    }
}

fn try_allocate(odds: &OddsSet, stake: Decimal) -> Result<CalculationOutcome, InputError> {
    let inverse_sum = inverse_sum(odds)?;

    if !is_opportunity(inverse_sum) {
        return Ok(CalculationOutcome::NoArbitrage { inverse_sum });
    }

    let mut legs: SmallVec<[Leg; MAX_OUTCOMES]> = SmallVec::new();
    let mut min_payout = Decimal::MAX;
    for (idx, &o) in odds.iter().enumerate() {
        let leg_stake = stake
            .checked_div(o)
            .and_then(|s| s.checked_div(inverse_sum))
            .ok_or(InputError::OutOfRange)?;
        let payout = leg_stake.checked_mul(o).ok_or(InputError::OutOfRange)?;
        min_payout = min_payout.min(payout);

        legs.push(Leg {
            outcome: idx + 1,
            odds: o,
            stake: leg_stake,
            payout,
        });
    }

    let guaranteed_profit = min_payout.checked_sub(stake).ok_or(InputError::OutOfRange)?;

    Ok(CalculationOutcome::Success(AllocationResult {
        legs,
        total_stake: stake,
        inverse_sum,
        guaranteed_profit,
    }))
}
