use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{OvertimeRule, PayInputs, PayrollTaxConfig, RegionalTaxRule, TaxBracket};
use crate::tables::TaxTable;

pub(crate) fn sample_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket::new(dec!(0), Some(dec!(12150)), dec!(0.10)),
        TaxBracket::new(dec!(12150), Some(dec!(49475)), dec!(0.12)),
        TaxBracket::new(dec!(49475), Some(dec!(105525)), dec!(0.22)),
        TaxBracket::new(dec!(105525), Some(dec!(201350)), dec!(0.24)),
        TaxBracket::new(dec!(201350), Some(dec!(255700)), dec!(0.32)),
        TaxBracket::new(dec!(255700), Some(dec!(639300)), dec!(0.35)),
        TaxBracket::new(dec!(639300), None, dec!(0.37)),
    ]
}

pub(crate) fn sample_payroll() -> PayrollTaxConfig {
    PayrollTaxConfig {
        social_security_rate: dec!(0.062),
        social_security_wage_base: dec!(176100),
        medicare_rate: dec!(0.0145),
    }
}

fn rule(
    code: &str,
    name: &str,
    flat_rate: Option<Decimal>,
    minimum_wage: Decimal,
    overtime_rule: OvertimeRule,
) -> RegionalTaxRule {
    RegionalTaxRule {
        region_code: code.parse().unwrap(),
        region_name: name.to_string(),
        no_income_tax: flat_rate.is_none(),
        flat_rate: flat_rate.unwrap_or_default(),
        minimum_wage,
        unemployment_wage_base: dec!(7000),
        overtime_rule,
    }
}

/// Deliberately out of order; the table sorts by code.
pub(crate) fn sample_regions() -> Vec<RegionalTaxRule> {
    vec![
        rule("TX", "Texas", None, dec!(7.25), OvertimeRule::Federal),
        rule("CA", "California", Some(dec!(0.06)), dec!(16.50), OvertimeRule::DailyAndWeekly),
        rule("NH", "New Hampshire", None, dec!(7.25), OvertimeRule::Federal),
        rule("FL", "Florida", None, dec!(13.00), OvertimeRule::Federal),
    ]
}

pub(crate) fn sample_table() -> TaxTable {
    TaxTable::new(2025, sample_brackets(), sample_payroll(), sample_regions()).unwrap()
}

pub(crate) fn tx_inputs(
    hourly_rate: Decimal,
    hours_per_week: Decimal,
) -> PayInputs {
    PayInputs::new(hourly_rate, hours_per_week, "TX".parse().unwrap())
}
