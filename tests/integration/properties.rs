//! Invariants checked over a spread of odds sets.

use arbi::arbitrage::{compute, OutcomeKind};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TOLERANCE: Decimal = dec!(0.000000001);

fn odds_sets() -> Vec<Vec<&'static str>> {
    vec![
        vec!["2.5", "1.8"],
        vec!["2.0", "2.0"],
        vec!["1.5", "2.9"],
        vec!["1.01", "101"],
        vec!["3", "3", "3"],
        vec!["3.1", "3.3", "3.7"],
        vec!["2", "4", "4"],
        vec!["2", "3", "6"],
        vec!["4", "4", "4", "4"],
        vec!["5", "6", "7", "8"],
        vec!["3.9", "4.2", "4.4", "4.1"],
        vec!["1.2", "9", "15", "40"],
    ]
}

fn inverse_sum(odds: &[&str]) -> Decimal {
    odds.iter()
        .map(|o| Decimal::ONE / o.parse::<Decimal>().unwrap())
        .sum()
}

#[test]
fn success_iff_inverse_sum_below_one() {
    for odds in odds_sets() {
        let outcome = compute(odds.len(), &odds, "100");
        let sum = inverse_sum(&odds).round_dp(20);

        if sum < Decimal::ONE {
            assert_eq!(outcome.kind(), OutcomeKind::Success, "odds {:?}", odds);
        } else {
            assert_eq!(outcome.kind(), OutcomeKind::NoArbitrage, "odds {:?}", odds);
        }
    }
}

#[test]
fn stakes_sum_to_total_and_payouts_are_equal() {
    for stake in ["1", "100", "1234.56"] {
        let total: Decimal = stake.parse().unwrap();

        for odds in odds_sets() {
            let outcome = compute(odds.len(), &odds, stake);
            let Some(result) = outcome.allocation() else {
                continue;
            };

            let staked: Decimal = result.stakes().sum();
            assert!((staked - total).abs() <= TOLERANCE, "odds {:?}", odds);

            let ideal = total / result.inverse_sum;
            for payout in result.payouts() {
                assert!((payout - ideal).abs() <= TOLERANCE, "odds {:?}", odds);
            }

            assert!(result.guaranteed_profit > Decimal::ZERO, "odds {:?}", odds);
        }
    }
}

#[test]
fn compute_is_idempotent() {
    for odds in odds_sets() {
        let first = compute(odds.len(), &odds, "250");
        let second = compute(odds.len(), &odds, "250");
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }
}

#[test]
fn compute_is_safe_across_threads() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| compute(2, &["2.5", "1.8"], "100")))
        .collect();

    let expected = compute(2, &["2.5", "1.8"], "100");
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
