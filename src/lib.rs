//! Arbitrage stake calculator for 2-4 outcome betting markets.
//!
//! Given decimal odds for every mutually exclusive outcome and a total stake,
//! the calculator decides whether a guaranteed profit exists and, if so,
//! how to split the stake.
//!
//! # Strategy
//!
//! An opportunity exists when the inverse odds sum to less than 1. Staking
//! each outcome in proportion to `1/odds` makes every outcome pay the same:
//!
//! ```text
//! Odds:        2.50  /  1.80
//! 1/odds:      0.40  +  0.5556 = 0.9556 < 1 ✅
//! Stakes:     41.86  / 58.14   (total 100.00)
//! Payout:    104.65 either way
//! Profit:      4.65 guaranteed
//! ```
//!
//! # Modules
//!
//! - [`arbitrage`]: Input validation, allocation and rendering
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: HTTP API for calculations, health and metrics
//! - [`metrics`]: Prometheus counters and latency histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod arbitrage;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;

pub use arbitrage::{compute, CalculationOutcome};
pub use config::Config;
pub use error::{ArbiError, InputError, Result};
