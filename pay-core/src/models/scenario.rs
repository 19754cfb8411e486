use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{NumericField, PayInputs, RegionCode};
use crate::{PayError, TaxTable};

/// A named hypothetical change to one input field.
///
/// ```
/// use rust_decimal_macros::dec;
/// use pay_core::{Adjustment, NumericField, PayInputs, Scenario};
///
/// let raise = Scenario::new(
///     "raise-2",
///     "+$2/hr",
///     Adjustment::Add { field: NumericField::HourlyRate, value: dec!(2) },
/// );
/// let baseline = PayInputs::new(dec!(15), dec!(40), "TX".parse().unwrap());
///
/// let applied = raise.apply(&baseline).unwrap();
///
/// assert_eq!(applied.hourly_rate, dec!(17));
/// assert_eq!(baseline.hourly_rate, dec!(15));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub label: String,
    pub adjustment: Adjustment,
}

/// The field, operation and value a scenario changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Adjustment {
    /// `field += value`
    Add { field: NumericField, value: Decimal },
    /// `field = value`
    Set { field: NumericField, value: Decimal },
    SetRegion { region: RegionCode },
    SetIncludeTips { value: bool },
}

impl Scenario {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        adjustment: Adjustment,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            adjustment,
        }
    }

    /// Returns a copy of `baseline` with the adjustment applied.
    ///
    /// The result is not validated here; the calculator rejects out-of-domain
    /// values so that scenarios and direct calls fail the same way.
    ///
    /// # Errors
    ///
    /// Returns [`PayError::InvalidInput`] if an `Add` overflows.
    pub fn apply(
        &self,
        baseline: &PayInputs,
    ) -> Result<PayInputs, PayError> {
        let mut working = baseline.clone();

        match &self.adjustment {
            Adjustment::Add { field, value } => {
                let current = working.get(*field);
                let updated =
                    current
                        .checked_add(*value)
                        .ok_or_else(|| PayError::InvalidInput {
                            field: *field,
                            value: current,
                            expected: "a sum within decimal range",
                        })?;
                working.set(*field, updated);
            }
            Adjustment::Set { field, value } => working.set(*field, *value),
            Adjustment::SetRegion { region } => working.region_code = region.clone(),
            Adjustment::SetIncludeTips { value } => working.include_tips = *value,
        }

        Ok(working)
    }

    /// Whether applying this scenario to `baseline` could not change anything.
    ///
    /// Covers no-op sets and adds, moving to the same region, moving from a
    /// no-tax region to another no-tax region, and toggling tips when there
    /// are none. Unknown regions are never redundant, so that evaluation
    /// reports them.
    ///
    /// The evaluator never calls this; hosts filter their catalog with it
    /// before evaluating.
    pub fn is_redundant_for(
        &self,
        baseline: &PayInputs,
        table: &TaxTable,
    ) -> bool {
        match &self.adjustment {
            Adjustment::Add { value, .. } => value.is_zero(),
            Adjustment::Set { field, value } => baseline.get(*field) == *value,
            Adjustment::SetRegion { region } => {
                if *region == baseline.region_code {
                    return true;
                }
                let target = table.regional_rule(region);
                let current = table.regional_rule(&baseline.region_code);
                matches!(
                    (target, current),
                    (Ok(target), Ok(current)) if target.no_income_tax && current.no_income_tax
                )
            }
            Adjustment::SetIncludeTips { value } => {
                baseline.include_tips == *value || baseline.tips_per_hour.is_zero()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::test_support::{sample_table, tx_inputs};

    fn scenario(adjustment: Adjustment) -> Scenario {
        Scenario::new("s", "S", adjustment)
    }

    // =========================================================================
    // apply tests
    // =========================================================================

    #[test]
    fn apply_add_increments_field() {
        let baseline = tx_inputs(dec!(15), dec!(40));
        let s = scenario(Adjustment::Add {
            field: NumericField::HoursPerWeek,
            value: dec!(5),
        });

        let applied = s.apply(&baseline).unwrap();

        assert_eq!(applied.hours_per_week, dec!(45));
    }

    #[test]
    fn apply_set_replaces_field() {
        let baseline = tx_inputs(dec!(15), dec!(40));
        let s = scenario(Adjustment::Set {
            field: NumericField::RetirementContributionPct,
            value: dec!(6),
        });

        let applied = s.apply(&baseline).unwrap();

        assert_eq!(applied.retirement_contribution_pct, dec!(6));
    }

    #[test]
    fn apply_set_region_changes_region_only() {
        let baseline = tx_inputs(dec!(15), dec!(40));
        let s = scenario(Adjustment::SetRegion {
            region: "CA".parse().unwrap(),
        });

        let applied = s.apply(&baseline).unwrap();

        assert_eq!(applied.region_code.as_str(), "CA");
        assert_eq!(applied.hourly_rate, baseline.hourly_rate);
    }

    #[test]
    fn apply_does_not_clamp_negative_results() {
        let baseline = tx_inputs(dec!(15), dec!(40));
        let s = scenario(Adjustment::Add {
            field: NumericField::HourlyRate,
            value: dec!(-20),
        });

        let applied = s.apply(&baseline).unwrap();

        assert_eq!(applied.hourly_rate, dec!(-5));
    }

    #[test]
    fn apply_reports_overflow_as_invalid_input() {
        let baseline = tx_inputs(Decimal::MAX, dec!(40));
        let s = scenario(Adjustment::Add {
            field: NumericField::HourlyRate,
            value: dec!(1),
        });

        let result = s.apply(&baseline);

        assert!(matches!(
            result,
            Err(PayError::InvalidInput {
                field: NumericField::HourlyRate,
                ..
            })
        ));
    }

    #[test]
    fn apply_leaves_baseline_untouched() {
        let baseline = tx_inputs(dec!(15), dec!(40));
        let before = baseline.clone();
        let s = scenario(Adjustment::SetIncludeTips { value: true });

        let _ = s.apply(&baseline).unwrap();

        assert_eq!(baseline, before);
    }

    // =========================================================================
    // is_redundant_for tests
    // =========================================================================

    #[test]
    fn moving_between_no_tax_regions_is_redundant() {
        let table = sample_table();
        let baseline = tx_inputs(dec!(15), dec!(40));
        let s = scenario(Adjustment::SetRegion {
            region: "FL".parse().unwrap(),
        });

        assert!(s.is_redundant_for(&baseline, &table));
    }

    #[test]
    fn moving_to_same_region_is_redundant() {
        let table = sample_table();
        let baseline = tx_inputs(dec!(15), dec!(40));
        let s = scenario(Adjustment::SetRegion {
            region: "TX".parse().unwrap(),
        });

        assert!(s.is_redundant_for(&baseline, &table));
    }

    #[test]
    fn moving_from_taxed_to_no_tax_region_is_not_redundant() {
        let table = sample_table();
        let mut baseline = tx_inputs(dec!(15), dec!(40));
        baseline.region_code = "CA".parse().unwrap();
        let s = scenario(Adjustment::SetRegion {
            region: "TX".parse().unwrap(),
        });

        assert!(!s.is_redundant_for(&baseline, &table));
    }

    #[test]
    fn moving_to_unknown_region_is_not_redundant() {
        let table = sample_table();
        let baseline = tx_inputs(dec!(15), dec!(40));
        let s = scenario(Adjustment::SetRegion {
            region: "ZZ".parse().unwrap(),
        });

        assert!(!s.is_redundant_for(&baseline, &table));
    }

    #[test]
    fn zero_add_and_same_value_set_are_redundant() {
        let table = sample_table();
        let baseline = tx_inputs(dec!(15), dec!(40));

        let add_zero = scenario(Adjustment::Add {
            field: NumericField::HourlyRate,
            value: dec!(0),
        });
        let set_same = scenario(Adjustment::Set {
            field: NumericField::HoursPerWeek,
            value: dec!(40),
        });

        assert!(add_zero.is_redundant_for(&baseline, &table));
        assert!(set_same.is_redundant_for(&baseline, &table));
    }

    #[test]
    fn including_tips_without_tips_is_redundant() {
        let table = sample_table();
        let mut baseline = tx_inputs(dec!(15), dec!(40));
        let s = scenario(Adjustment::SetIncludeTips { value: true });

        assert!(s.is_redundant_for(&baseline, &table));

        baseline.tips_per_hour = dec!(3);
        assert!(!s.is_redundant_for(&baseline, &table));
    }
}
