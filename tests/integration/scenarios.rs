//! Worked examples with known outcomes.

use arbi::arbitrage::{compute, render, CalculationOutcome, OutcomeKind};
use arbi::InputError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn within(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() <= tolerance
}

#[test]
fn even_money_pair_breaks_even() {
    let outcome = compute(2, &["2.0", "2.0"], "100");

    assert_eq!(outcome.kind(), OutcomeKind::NoArbitrage);
    assert_eq!(render(&outcome), "No arbitrage opportunity.");
}

#[test]
fn two_way_opportunity() {
    let outcome = compute(2, &["2.5", "1.8"], "100");
    let result = outcome.allocation().expect("expected an allocation");

    assert!(within(result.legs[0].stake, dec!(41.86), dec!(0.005)));
    assert!(within(result.legs[1].stake, dec!(58.14), dec!(0.005)));
    assert!(within(result.legs[0].payout, dec!(104.65), dec!(0.005)));
    assert!(within(result.legs[1].payout, dec!(104.65), dec!(0.005)));
    assert!(within(result.guaranteed_profit, dec!(4.65), dec!(0.005)));

    let expected = "\
To guarantee a profit, bet:
Outcome 1: 41.86
Outcome 2: 58.14

Total payout for each outcome:
Outcome 1: 104.65
Outcome 2: 104.65

Guaranteed profit: 4.65";
    assert_eq!(render(&outcome), expected);
}

#[test]
fn three_way_thirds_break_even() {
    let outcome = compute(3, &["3", "3", "3"], "90");

    assert_eq!(outcome.kind(), OutcomeKind::NoArbitrage);
}

#[test]
fn unparsable_odds_is_invalid() {
    let outcome = compute(2, &["abc", "2.0"], "50");

    assert_eq!(
        outcome,
        CalculationOutcome::InvalidInput(InputError::OddsCountMismatch {
            expected: 2,
            parsed: 1
        })
    );
    assert_eq!(render(&outcome), "Please enter valid odds and bet.");
}

#[test]
fn four_way_opportunity() {
    let outcome = compute(4, &["5", "6", "7", "8"], "200");
    let result = outcome.allocation().expect("expected an allocation");

    // 1/5 + 1/6 + 1/7 + 1/8 = 533/840
    let inverse_sum = dec!(533) / dec!(840);
    assert!(within(result.inverse_sum, inverse_sum, dec!(0.000000001)));

    let odds = [dec!(5), dec!(6), dec!(7), dec!(8)];
    for (leg, o) in result.legs.iter().zip(odds) {
        let expected_stake = (dec!(200) / o) / inverse_sum;
        assert!(within(leg.stake, expected_stake, dec!(0.000000001)));
        assert!(within(leg.payout, dec!(200) / inverse_sum, dec!(0.000000001)));
    }

    // 200 * 840 / 533 - 200 ≈ 115.20
    assert!(within(result.guaranteed_profit, dec!(115.20), dec!(0.005)));
    assert!(render(&outcome).ends_with("Guaranteed profit: 115.20"));
}

#[test]
fn non_positive_odds_is_invalid() {
    assert_eq!(compute(2, &["0", "3"], "10").kind(), OutcomeKind::InvalidInput);
    assert_eq!(compute(3, &["2", "-4", "5"], "10").kind(), OutcomeKind::InvalidInput);
}

#[test]
fn non_numeric_stake_is_invalid() {
    assert_eq!(compute(2, &["2.5", "1.8"], "").kind(), OutcomeKind::InvalidInput);
    assert_eq!(compute(2, &["2.5", "1.8"], "ten").kind(), OutcomeKind::InvalidInput);
}

#[test]
fn odds_count_mismatch_is_invalid() {
    let outcome = compute(3, &["2.5", "1.8", ""], "100");

    assert_eq!(
        outcome,
        CalculationOutcome::InvalidInput(InputError::OddsCountMismatch {
            expected: 3,
            parsed: 2
        })
    );
}

#[test]
fn zero_stake_is_accepted() {
    let outcome = compute(2, &["2.5", "1.8"], "0");

    assert!(outcome.is_success());
    assert!(render(&outcome).ends_with("Guaranteed profit: 0.00"));
}

#[test]
fn digit_separators_are_invalid() {
    let outcome = compute(2, &["1_0", "1_0"], "1_0");

    assert_eq!(
        outcome,
        CalculationOutcome::InvalidInput(InputError::OddsCountMismatch {
            expected: 2,
            parsed: 0,
        })
    );
    assert_eq!(render(&outcome), "Please enter valid odds and bet.");
}

#[test]
fn odds_beyond_decimal_range_are_out_of_range() {
    for odds in ["1e30", "1e-30", "0.00000000000000000000000000001"] {
        assert_eq!(
            compute(2, &[odds, "2"], "10"),
            CalculationOutcome::InvalidInput(InputError::OutOfRange),
            "{}",
            odds
        );
    }
}
