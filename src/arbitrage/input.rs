//! Parsing and validation of raw calculator input.
//!
//! Odds entries are parsed best-effort: unparsable entries are dropped and the
//! request is rejected only when the surviving count differs from the declared
//! outcome count. This policy lives here alone so the calculator never sees
//! raw text.

use std::str::FromStr;

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::error::InputError;

/// Fewest outcomes a market can have.
pub const MIN_OUTCOMES: usize = 2;
/// Most outcomes the calculator accepts.
pub const MAX_OUTCOMES: usize = 4;

/// Ordered, strictly positive decimal odds for 2 to 4 outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OddsSet(SmallVec<[Decimal; MAX_OUTCOMES]>);

impl OddsSet {
    /// Build an odds set, enforcing length and positivity.
    pub fn new(odds: impl IntoIterator<Item = Decimal>) -> Result<Self, InputError> {
        let odds: SmallVec<[Decimal; MAX_OUTCOMES]> = odds.into_iter().collect();

        if !(MIN_OUTCOMES..=MAX_OUTCOMES).contains(&odds.len()) {
            return Err(InputError::UnsupportedOutcomeCount(odds.len()));
        }

        if let Some((idx, &bad)) = odds.iter().enumerate().find(|(_, o)| **o <= Decimal::ZERO) {
            return Err(InputError::NonPositiveOdds {
                outcome: idx + 1,
                odds: bad,
            });
        }

        Ok(Self(odds))
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; an odds set holds at least two outcomes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Odds in outcome order.
    pub fn as_slice(&self) -> &[Decimal] {
        &self.0
    }

    /// Iterate odds in outcome order.
    pub fn iter(&self) -> impl Iterator<Item = &Decimal> {
        self.0.iter()
    }
}

/// Input that passed validation and is ready for allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    /// Odds per outcome.
    pub odds: OddsSet,
    /// Total stake to distribute. May be zero or negative.
    pub stake: Decimal,
}

/// Why raw text did not yield a decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// Empty, or not a plain or scientific decimal literal.
    NotANumber,
    /// A well-formed literal outside the decimal range, or nonzero but below
    /// its precision.
    OutOfRange,
}

/// Parse user-entered text as a decimal.
///
/// Surrounding whitespace is ignored. Accepted literals are an optional
/// sign, digits with an optional fractional part (`2`, `2.5`, `.5`, `2.`),
/// and an optional exponent (`1.5e1`). Digit separators, hex, `NaN` and
/// `Infinity` are not numbers.
pub fn parse_number(raw: &str) -> Result<Decimal, ParseFailure> {
    let literal = canonical_literal(raw.trim()).ok_or(ParseFailure::NotANumber)?;

    let value = if literal.exponent {
        Decimal::from_scientific(&literal.text)
    } else {
        Decimal::from_str(&literal.text)
    }
    .map_err(|_| ParseFailure::OutOfRange)?;

    if value.is_zero() && literal.nonzero {
        return Err(ParseFailure::OutOfRange);
    }

    Ok(value)
}

/// Parse user-entered text as a decimal, discarding the failure reason.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    parse_number(raw).ok()
}

struct Literal {
    text: String,
    exponent: bool,
    nonzero: bool,
}

fn split_sign(text: &str) -> (&str, &str) {
    match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    }
}

fn all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

/// Check `text` against the literal grammar and rewrite it in the form
/// `rust_decimal` parses: explicit integer part, no bare trailing point,
/// no `+` signs.
fn canonical_literal(text: &str) -> Option<Literal> {
    let (mantissa, exponent) = match text.find(|c| c == 'e' || c == 'E') {
        Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
        None => (text, None),
    };

    let (sign, digits) = split_sign(mantissa);
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let mut canonical = String::with_capacity(text.len() + 1);
    canonical.push_str(sign);
    canonical.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        canonical.push('.');
        canonical.push_str(frac_part);
    }

    if let Some(exp) = exponent {
        let (exp_sign, exp_digits) = split_sign(exp);
        if exp_digits.is_empty() || !all_digits(exp_digits) {
            return None;
        }
        canonical.push('e');
        canonical.push_str(exp_sign);
        canonical.push_str(exp_digits);
    }

    Some(Literal {
        text: canonical,
        exponent: exponent.is_some(),
        nonzero: int_part.bytes().chain(frac_part.bytes()).any(|b| b != b'0'),
    })
}

/// Validate raw odds and stake text for a declared outcome count.
///
/// Checks run in order and the first failure is returned:
/// outcome count, field count, parsed odds count, odds range, odds
/// positivity, stake. Odds that are not numbers are dropped before the
/// count comparison; out-of-range odds still count as parsed.
pub fn validate<S: AsRef<str>>(
    outcome_count: usize,
    odds_inputs: &[S],
    stake_input: &str,
) -> Result<ValidatedInput, InputError> {
    if !(MIN_OUTCOMES..=MAX_OUTCOMES).contains(&outcome_count) {
        return Err(InputError::UnsupportedOutcomeCount(outcome_count));
    }

    if odds_inputs.len() != outcome_count {
        return Err(InputError::OddsFieldCount {
            expected: outcome_count,
            supplied: odds_inputs.len(),
        });
    }

    let mut parsed: SmallVec<[Decimal; MAX_OUTCOMES]> = SmallVec::new();
    let mut out_of_range = 0;
    for raw in odds_inputs {
        match parse_number(raw.as_ref()) {
            Ok(value) => parsed.push(value),
            Err(ParseFailure::OutOfRange) => out_of_range += 1,
            Err(ParseFailure::NotANumber) => {}
        }
    }

    let numeric = parsed.len() + out_of_range;
    if numeric != outcome_count {
        return Err(InputError::OddsCountMismatch {
            expected: outcome_count,
            parsed: numeric,
        });
    }
    if out_of_range > 0 {
        return Err(InputError::OutOfRange);
    }

    let odds = OddsSet::new(parsed)?;

    let stake = match parse_number(stake_input) {
        Ok(value) => value,
        Err(_) if stake_input.trim().is_empty() => return Err(InputError::MissingStake),
        Err(ParseFailure::NotANumber) => {
            return Err(InputError::InvalidStake(stake_input.to_string()))
        }
        Err(ParseFailure::OutOfRange) => return Err(InputError::OutOfRange),
    };

    Ok(ValidatedInput { odds, stake })
}
