//! Text rendering of calculation outcomes.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use super::calculator::{AllocationResult, CalculationOutcome};

/// Shown when the odds leave no guaranteed profit.
pub const NO_ARBITRAGE_MESSAGE: &str = "No arbitrage opportunity.";
/// Shown for any rejected input, whatever the underlying reason.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter valid odds and bet.";

const STAKES_HEADER: &str = "To guarantee a profit, bet:";
const PAYOUTS_HEADER: &str = "Total payout for each outcome:";

/// Format an amount with exactly two fractional digits, rounding half up.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Render an outcome as user-facing text.
pub fn render(outcome: &CalculationOutcome) -> String {
    outcome.to_string()
}

fn write_allocation(f: &mut fmt::Formatter<'_>, result: &AllocationResult) -> fmt::Result {
    writeln!(f, "{}", STAKES_HEADER)?;
    for leg in &result.legs {
        writeln!(f, "Outcome {}: {}", leg.outcome, format_amount(leg.stake))?;
    }

    writeln!(f)?;
    writeln!(f, "{}", PAYOUTS_HEADER)?;
    for leg in &result.legs {
        writeln!(f, "Outcome {}: {}", leg.outcome, format_amount(leg.payout))?;
    }

    writeln!(f)?;
    write!(f, "Guaranteed profit: {}", format_amount(result.guaranteed_profit))
}

impl fmt::Display for CalculationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(result) => write_allocation(f, result),
            Self::NoArbitrage { .. } => f.write_str(NO_ARBITRAGE_MESSAGE),
            Self::InvalidInput(_) => f.write_str(INVALID_INPUT_MESSAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbitrage::calculator::allocate;
    use crate::arbitrage::input::OddsSet;
    use crate::error::InputError;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn format_amount_pads_and_rounds() {
        assert_eq!(format_amount(dec!(100)), "100.00");
        assert_eq!(format_amount(dec!(4.6)), "4.60");
        assert_eq!(format_amount(dec!(41.86046511)), "41.86");
        assert_eq!(format_amount(dec!(0.125)), "0.13");
        assert_eq!(format_amount(dec!(-2.345)), "-2.35");
    }

    #[test]
    fn renders_success_block() {
        let odds = OddsSet::new([dec!(2.5), dec!(1.8)]).unwrap();
        let text = render(&allocate(&odds, dec!(100)));

        let expected = "\
To guarantee a profit, bet:
Outcome 1: 41.86
Outcome 2: 58.14

Total payout for each outcome:
Outcome 1: 104.65
Outcome 2: 104.65

Guaranteed profit: 4.65";
        assert_eq!(text, expected);
    }

    #[test]
    fn renders_no_arbitrage() {
        let outcome = CalculationOutcome::NoArbitrage { inverse_sum: dec!(1) };
        assert_eq!(render(&outcome), "No arbitrage opportunity.");
    }

    #[test]
    fn invalid_input_message_is_collapsed() {
        let reasons = [
            InputError::MissingStake,
            InputError::OutOfRange,
            InputError::OddsCountMismatch { expected: 2, parsed: 1 },
        ];
        for reason in reasons {
            assert_eq!(
                render(&CalculationOutcome::InvalidInput(reason)),
                "Please enter valid odds and bet."
            );
        }
    }
}
