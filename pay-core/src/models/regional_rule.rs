use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RegionCode;

/// How a region triggers overtime pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeRule {
    /// Federal FLSA rule: hours over 40 per week.
    Federal,
    /// Daily thresholds in addition to the weekly one (e.g. California).
    DailyAndWeekly,
}

impl OvertimeRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Federal => "federal",
            Self::DailyAndWeekly => "daily_and_weekly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "federal" => Some(Self::Federal),
            "daily_and_weekly" => Some(Self::DailyAndWeekly),
            _ => None,
        }
    }
}

/// Income tax rule and labor metadata for one region.
///
/// Regions are modeled as either exempt or taxed at a single flat rate on
/// taxable income. Progressive state brackets are out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalTaxRule {
    pub region_code: RegionCode,
    pub region_name: String,
    /// When set, regional tax is zero whatever `flat_rate` holds.
    pub no_income_tax: bool,
    pub flat_rate: Decimal,
    pub minimum_wage: Decimal,
    pub unemployment_wage_base: Decimal,
    pub overtime_rule: OvertimeRule,
}

impl RegionalTaxRule {
    /// Rate actually applied to taxable income.
    pub fn effective_rate(&self) -> Decimal {
        if self.no_income_tax {
            Decimal::ZERO
        } else {
            self.flat_rate
        }
    }

    pub fn is_below_minimum_wage(
        &self,
        hourly_rate: Decimal,
    ) -> bool {
        hourly_rate < self.minimum_wage
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn rule(no_income_tax: bool) -> RegionalTaxRule {
        RegionalTaxRule {
            region_code: "NH".parse().unwrap(),
            region_name: "New Hampshire".to_string(),
            no_income_tax,
            flat_rate: dec!(0.05),
            minimum_wage: dec!(7.25),
            unemployment_wage_base: dec!(14000),
            overtime_rule: OvertimeRule::Federal,
        }
    }

    #[test]
    fn effective_rate_ignores_flat_rate_when_exempt() {
        assert_eq!(rule(true).effective_rate(), dec!(0));
    }

    #[test]
    fn effective_rate_uses_flat_rate_when_taxed() {
        assert_eq!(rule(false).effective_rate(), dec!(0.05));
    }

    #[test]
    fn below_minimum_wage_is_strict() {
        let rule = rule(true);

        assert!(rule.is_below_minimum_wage(dec!(7.00)));
        assert!(!rule.is_below_minimum_wage(dec!(7.25)));
    }

    #[test]
    fn overtime_rule_round_trips_through_str() {
        for rule in [OvertimeRule::Federal, OvertimeRule::DailyAndWeekly] {
            assert_eq!(OvertimeRule::parse(rule.as_str()), Some(rule));
        }
        assert_eq!(OvertimeRule::parse("weekly"), None);
    }
}
