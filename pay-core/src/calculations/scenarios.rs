//! Scenario Delta Evaluator: marginal impact of hypothetical input changes.
//!
//! Each scenario is applied to its own clone of the baseline, run through the
//! full [`PaycheckCalculator`], and diffed against the baseline breakdown.
//! Scenarios are independent of one another and results come back in input
//! order. Nothing is filtered or cached.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::PaycheckCalculator;
use crate::calculations::common::WEEKS_PER_YEAR;
use crate::models::{NumericField, PayBreakdown, PayInputs, Scenario};
use crate::{PayError, TaxTable};

/// One evaluated scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    /// Full breakdown under the adjusted inputs.
    pub breakdown: PayBreakdown,
    pub weekly_net_delta: Decimal,
    pub annual_net_delta: Decimal,
}

/// A scenario whose adjusted inputs could not be calculated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("scenario '{scenario_id}' failed: {source}")]
pub struct ScenarioError {
    pub scenario_id: String,
    #[source]
    pub source: PayError,
}

#[derive(Debug, Clone, Copy)]
pub struct ScenarioEvaluator<'a> {
    calculator: PaycheckCalculator<'a>,
}

impl<'a> ScenarioEvaluator<'a> {
    pub fn new(table: &'a TaxTable) -> Self {
        Self {
            calculator: PaycheckCalculator::new(table),
        }
    }

    /// Evaluates every scenario, capturing failures per scenario.
    ///
    /// The returned vector has one entry per scenario, in input order. A
    /// failing scenario does not stop the others.
    pub fn evaluate(
        &self,
        baseline: &PayInputs,
        baseline_breakdown: &PayBreakdown,
        scenarios: &[Scenario],
    ) -> Vec<Result<ScenarioResult, ScenarioError>> {
        scenarios
            .iter()
            .map(|scenario| {
                self.evaluate_one(baseline, baseline_breakdown, scenario)
                    .inspect_err(|err| warn!(scenario = %err.scenario_id, error = %err.source, "scenario rejected"))
            })
            .collect()
    }

    /// Evaluates every scenario, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the [`ScenarioError`] of the first scenario whose adjusted
    /// inputs are invalid.
    pub fn evaluate_strict(
        &self,
        baseline: &PayInputs,
        baseline_breakdown: &PayBreakdown,
        scenarios: &[Scenario],
    ) -> Result<Vec<ScenarioResult>, ScenarioError> {
        scenarios
            .iter()
            .map(|scenario| self.evaluate_one(baseline, baseline_breakdown, scenario))
            .collect()
    }

    fn evaluate_one(
        &self,
        baseline: &PayInputs,
        baseline_breakdown: &PayBreakdown,
        scenario: &Scenario,
    ) -> Result<ScenarioResult, ScenarioError> {
        let to_error = |source| ScenarioError {
            scenario_id: scenario.id.clone(),
            source,
        };

        let adjusted = scenario.apply(baseline).map_err(to_error)?;
        let breakdown = self.calculator.calculate(&adjusted).map_err(to_error)?;

        let annual_net_delta = breakdown
            .annual_net
            .checked_sub(baseline_breakdown.annual_net)
            .ok_or_else(|| {
                to_error(PayError::InvalidInput {
                    field: NumericField::HourlyRate,
                    value: adjusted.hourly_rate,
                    expected: "an amount within decimal range",
                })
            })?;
        let weekly_net_delta = annual_net_delta / WEEKS_PER_YEAR;

        debug!(
            scenario = %scenario.id,
            annual_net_delta = %annual_net_delta,
            "scenario evaluated"
        );

        Ok(ScenarioResult {
            scenario: scenario.clone(),
            breakdown,
            weekly_net_delta,
            annual_net_delta,
        })
    }
}

/// Orders results by annual net delta, largest gain first.
///
/// The sort is stable, so scenarios with equal deltas keep their input order.
pub fn rank_by_annual_delta(results: &[ScenarioResult]) -> Vec<&ScenarioResult> {
    let mut ranked: Vec<&ScenarioResult> = results.iter().collect();
    ranked.sort_by(|a, b| b.annual_net_delta.cmp(&a.annual_net_delta));
    ranked
}
