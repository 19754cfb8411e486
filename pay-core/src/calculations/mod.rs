//! Pay calculations.
//!
//! The paycheck calculator turns one set of inputs into a full breakdown; the
//! scenario evaluator re-runs it under hypothetical changes.

pub mod common;
mod paycheck;
mod scenarios;

pub use paycheck::{PaycheckCalculator, federal_income_tax};
pub use scenarios::{ScenarioError, ScenarioEvaluator, ScenarioResult, rank_by_annual_delta};
