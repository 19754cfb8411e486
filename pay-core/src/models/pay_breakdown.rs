use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Full result of a paycheck calculation.
///
/// Amounts are raw, unrounded values; formatting is left to the host.
/// `annual_gross == total_tax + pre_tax_retirement_contribution + annual_net`
/// always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    pub weekly_gross: Decimal,
    pub annual_gross: Decimal,

    /// Annual gross minus the pre-tax retirement contribution.
    pub taxable_income: Decimal,

    pub federal_tax: Decimal,
    pub regional_tax: Decimal,
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
    /// Social Security plus Medicare.
    pub payroll_tax: Decimal,
    pub pre_tax_retirement_contribution: Decimal,
    pub total_tax: Decimal,

    pub annual_net: Decimal,
    pub weekly_net: Decimal,
    pub hourly_net: Decimal,
    pub monthly_net: Decimal,

    /// Total tax as a percentage of annual gross.
    pub effective_tax_rate_pct: Decimal,
    /// Annual net as a percentage of annual gross.
    pub net_pay_ratio_pct: Decimal,
}
