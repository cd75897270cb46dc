//! Unified error types for the arbitrage calculator.

use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for the application shell (CLI and HTTP server).
#[derive(Error, Debug)]
pub enum ArbiError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a calculation request is rejected as invalid input.
///
/// Every variant renders to the same user-facing message; the variant itself
/// is kept for logs and machine-readable output.
#[derive(Error, Debug, Clone, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum InputError {
    /// Outcome count outside the supported 2..=4 range.
    #[error("unsupported outcome count {0}: expected 2 to 4")]
    UnsupportedOutcomeCount(usize),

    /// Number of odds fields supplied differs from the outcome count.
    #[error("expected {expected} odds fields, got {supplied}")]
    OddsFieldCount {
        /// Declared outcome count.
        expected: usize,
        /// Fields actually supplied.
        supplied: usize,
    },

    /// Fewer odds parsed than outcomes declared.
    #[error("expected {expected} numeric odds, parsed {parsed}")]
    OddsCountMismatch {
        /// Declared outcome count.
        expected: usize,
        /// Odds that parsed as numbers.
        parsed: usize,
    },

    /// Odds must be strictly positive.
    #[error("odds for outcome {outcome} must be positive, got {odds}")]
    NonPositiveOdds {
        /// 1-based outcome index.
        outcome: usize,
        /// Offending odds value.
        odds: Decimal,
    },

    /// Stake field empty.
    #[error("stake is missing")]
    MissingStake,

    /// Stake field is not a number.
    #[error("stake {0:?} is not a number")]
    InvalidStake(String),

    /// Values exceed the representable decimal range.
    #[error("values are out of the supported numeric range")]
    OutOfRange,
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ArbiError>;
