//! Arbitrage module for validating input and allocating stakes.
//!
//! This module handles:
//! - Raw text parsing and validation
//! - Stake allocation and profit calculations
//! - Text rendering of outcomes

pub mod calculator;
pub mod engine;
pub mod input;
pub mod report;

pub use calculator::{allocate, AllocationResult, CalculationOutcome, Leg, OutcomeKind};
pub use engine::{compute, CalculationRequest};
pub use input::{parse_decimal, parse_number, validate, OddsSet, ParseFailure, ValidatedInput};
pub use report::{format_amount, render};
