use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RegionCode;

/// Everything a paycheck estimate depends on.
///
/// The host clamps UI values to the valid ranges before building this; the
/// calculator still rejects anything out of domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayInputs {
    /// Base hourly wage, before tips.
    pub hourly_rate: Decimal,
    /// Hours worked per week, 0 to 168.
    pub hours_per_week: Decimal,
    pub region_code: RegionCode,
    /// Traditional (pre-tax) retirement contribution, 0 to 100 percent of gross.
    pub retirement_contribution_pct: Decimal,
    pub tips_per_hour: Decimal,
    /// Tips only count toward gross when this is set.
    pub include_tips: bool,
}

impl PayInputs {
    /// Inputs with no tips and no retirement contribution.
    pub fn new(
        hourly_rate: Decimal,
        hours_per_week: Decimal,
        region_code: RegionCode,
    ) -> Self {
        Self {
            hourly_rate,
            hours_per_week,
            region_code,
            retirement_contribution_pct: Decimal::ZERO,
            tips_per_hour: Decimal::ZERO,
            include_tips: false,
        }
    }

    pub fn get(
        &self,
        field: NumericField,
    ) -> Decimal {
        match field {
            NumericField::HourlyRate => self.hourly_rate,
            NumericField::HoursPerWeek => self.hours_per_week,
            NumericField::RetirementContributionPct => self.retirement_contribution_pct,
            NumericField::TipsPerHour => self.tips_per_hour,
        }
    }

    pub fn set(
        &mut self,
        field: NumericField,
        value: Decimal,
    ) {
        match field {
            NumericField::HourlyRate => self.hourly_rate = value,
            NumericField::HoursPerWeek => self.hours_per_week = value,
            NumericField::RetirementContributionPct => self.retirement_contribution_pct = value,
            NumericField::TipsPerHour => self.tips_per_hour = value,
        }
    }
}

/// The numeric fields of [`PayInputs`] a scenario can add to or set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    HourlyRate,
    HoursPerWeek,
    RetirementContributionPct,
    TipsPerHour,
}

impl NumericField {
    pub const ALL: [NumericField; 4] = [
        Self::HourlyRate,
        Self::HoursPerWeek,
        Self::RetirementContributionPct,
        Self::TipsPerHour,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HourlyRate => "hourly_rate",
            Self::HoursPerWeek => "hours_per_week",
            Self::RetirementContributionPct => "retirement_contribution_pct",
            Self::TipsPerHour => "tips_per_hour",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == s)
    }
}

impl fmt::Display for NumericField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_defaults_optional_fields_to_zero() {
        let inputs = PayInputs::new(dec!(15), dec!(40), "TX".parse().unwrap());

        assert_eq!(inputs.retirement_contribution_pct, dec!(0));
        assert_eq!(inputs.tips_per_hour, dec!(0));
        assert!(!inputs.include_tips);
    }

    #[test]
    fn set_then_get_touches_only_that_field() {
        let mut inputs = PayInputs::new(dec!(15), dec!(40), "TX".parse().unwrap());

        inputs.set(NumericField::TipsPerHour, dec!(4.50));

        assert_eq!(inputs.get(NumericField::TipsPerHour), dec!(4.50));
        assert_eq!(inputs.get(NumericField::HourlyRate), dec!(15));
        assert_eq!(inputs.get(NumericField::HoursPerWeek), dec!(40));
    }

    #[test]
    fn numeric_field_parse_matches_as_str() {
        for field in NumericField::ALL {
            assert_eq!(NumericField::parse(field.as_str()), Some(field));
        }
        assert_eq!(NumericField::parse("region_code"), None);
    }
}
