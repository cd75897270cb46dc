//! Integration tests for the arbitrage calculator.
//!
//! These exercise the public API end to end, from raw text input to the
//! rendered output.

mod properties;
mod scenarios;
