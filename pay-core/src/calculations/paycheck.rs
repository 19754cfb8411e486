//! Paycheck Calculator: hourly wage to full annual pay breakdown.
//!
//! # Pipeline
//!
//! Every calculation runs the same fixed sequence of steps:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Effective hourly rate = hourly rate + tips per hour (only when tips are included) |
//! | 2    | Weekly gross = effective hourly rate × hours per week |
//! | 3    | Annual gross = weekly gross × 52 |
//! | 4    | Pre-tax retirement contribution = annual gross × contribution % |
//! | 5    | Taxable income = annual gross − retirement contribution |
//! | 6    | Federal tax: marginal brackets applied to taxable income |
//! | 7    | Regional tax: taxable income × flat rate (0 for no-tax regions) |
//! | 8    | Social Security = min(annual gross, wage base) × rate |
//! | 9    | Medicare = annual gross × rate (uncapped) |
//! | 10   | Total tax = federal + regional + Social Security + Medicare |
//! | 11   | Annual net = annual gross − total tax − retirement contribution |
//! | 12   | Weekly, monthly and hourly net; effective tax rate and net pay ratio |
//!
//! The year is a flat 52 weeks with no calendar awareness or proration; this
//! is a steady-state estimate, not a payroll run. Amounts are never rounded.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pay_core::calculations::PaycheckCalculator;
//! use pay_core::{OvertimeRule, PayInputs, PayrollTaxConfig, RegionalTaxRule, TaxBracket, TaxTable};
//!
//! let table = TaxTable::new(
//!     2025,
//!     vec![
//!         TaxBracket::new(dec!(0), Some(dec!(12150)), dec!(0.10)),
//!         TaxBracket::new(dec!(12150), Some(dec!(49475)), dec!(0.12)),
//!         TaxBracket::new(dec!(49475), None, dec!(0.22)),
//!     ],
//!     PayrollTaxConfig {
//!         social_security_rate: dec!(0.062),
//!         social_security_wage_base: dec!(176100),
//!         medicare_rate: dec!(0.0145),
//!     },
//!     vec![RegionalTaxRule {
//!         region_code: "TX".parse().unwrap(),
//!         region_name: "Texas".to_string(),
//!         no_income_tax: true,
//!         flat_rate: dec!(0),
//!         minimum_wage: dec!(7.25),
//!         unemployment_wage_base: dec!(9000),
//!         overtime_rule: OvertimeRule::Federal,
//!     }],
//! )
//! .unwrap();
//!
//! let inputs = PayInputs::new(dec!(15), dec!(40), "TX".parse().unwrap());
//! let breakdown = PaycheckCalculator::new(&table).calculate(&inputs).unwrap();
//!
//! assert_eq!(breakdown.annual_gross, dec!(31200));
//! assert_eq!(breakdown.federal_tax, dec!(3501));
//! assert_eq!(breakdown.regional_tax, dec!(0));
//! assert_eq!(breakdown.annual_net, dec!(25312.2));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::calculations::common::{
    HOURS_PER_WEEK_MAX, MONTHS_PER_YEAR, ONE_HUNDRED, WEEKS_PER_YEAR, percent_of,
};
use crate::models::{NumericField, PayBreakdown, PayInputs, PayrollTaxConfig, RegionalTaxRule, TaxBracket};
use crate::{PayError, TaxTable};

/// Applies marginal federal brackets to `taxable_income`.
///
/// Each bracket taxes only the slice of income that falls inside it, so the
/// result is continuous and non-decreasing in income. Zero or negative income
/// owes nothing.
///
/// ```
/// use rust_decimal_macros::dec;
/// use pay_core::TaxBracket;
/// use pay_core::calculations::federal_income_tax;
///
/// let brackets = vec![
///     TaxBracket::new(dec!(0), Some(dec!(10000)), dec!(0.10)),
///     TaxBracket::new(dec!(10000), None, dec!(0.20)),
/// ];
///
/// assert_eq!(federal_income_tax(&brackets, dec!(15000)), dec!(2000));
/// ```
pub fn federal_income_tax(
    brackets: &[TaxBracket],
    taxable_income: Decimal,
) -> Decimal {
    let mut remaining = taxable_income;
    let mut tax = Decimal::ZERO;

    for bracket in brackets {
        if remaining <= Decimal::ZERO {
            break;
        }
        let taxed = match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        tax += taxed * bracket.rate;
        remaining -= taxed;
        trace!(
            min = %bracket.min_income,
            rate = %bracket.rate,
            taxed = %taxed,
            "applied federal bracket"
        );
    }

    tax
}

/// Calculator producing a [`PayBreakdown`] from [`PayInputs`].
///
/// Holds a borrowed [`TaxTable`]; take a snapshot from the provider and keep
/// it for the life of the calculator.
#[derive(Debug, Clone, Copy)]
pub struct PaycheckCalculator<'a> {
    table: &'a TaxTable,
}

impl<'a> PaycheckCalculator<'a> {
    pub fn new(table: &'a TaxTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a TaxTable {
        self.table
    }

    /// Runs the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`PayError::InvalidInput`] if:
    /// - `hourly_rate` or `tips_per_hour` is negative
    /// - `hours_per_week` is outside [0, 168]
    /// - `retirement_contribution_pct` is outside [0, 100]
    /// - the gross pay derived from the rate does not fit in a `Decimal`
    ///
    /// Returns [`PayError::UnknownRegion`] if the table has no rule for the region.
    pub fn calculate(
        &self,
        inputs: &PayInputs,
    ) -> Result<PayBreakdown, PayError> {
        self.validate(inputs)?;
        let region = self.table.regional_rule(&inputs.region_code)?;
        let payroll = self.table.payroll();

        let out_of_range = || PayError::InvalidInput {
            field: NumericField::HourlyRate,
            value: inputs.hourly_rate,
            expected: "an amount within decimal range",
        };

        let effective_hourly_rate = self
            .effective_hourly_rate(inputs.hourly_rate, inputs.tips_per_hour, inputs.include_tips)
            .ok_or_else(out_of_range)?;
        let weekly_gross = self
            .weekly_gross(effective_hourly_rate, inputs.hours_per_week)
            .ok_or_else(out_of_range)?;
        let annual_gross = self.annual_gross(weekly_gross).ok_or_else(out_of_range)?;

        // Traditional contributions come out before income tax.
        let retirement = self
            .retirement_contribution(annual_gross, inputs.retirement_contribution_pct)
            .ok_or_else(out_of_range)?;
        let taxable_income = self.taxable_income(annual_gross, retirement);

        let federal_tax = federal_income_tax(self.table.federal_brackets(), taxable_income);
        let regional_tax = self.regional_tax(region, taxable_income);

        // Payroll taxes apply to full gross, retirement included.
        let social_security_tax = self.social_security_tax(payroll, annual_gross);
        let medicare_tax = self.medicare_tax(payroll, annual_gross);
        let payroll_tax = social_security_tax + medicare_tax;

        let total_tax = federal_tax
            .checked_add(regional_tax)
            .and_then(|t| t.checked_add(payroll_tax))
            .ok_or_else(out_of_range)?;
        let annual_net = annual_gross
            .checked_sub(total_tax)
            .and_then(|n| n.checked_sub(retirement))
            .ok_or_else(out_of_range)?;
        let weekly_net = annual_net / WEEKS_PER_YEAR;

        debug!(
            region = %inputs.region_code,
            tax_year = self.table.tax_year(),
            annual_gross = %annual_gross,
            total_tax = %total_tax,
            annual_net = %annual_net,
            "paycheck calculated"
        );

        Ok(PayBreakdown {
            weekly_gross,
            annual_gross,
            taxable_income,
            federal_tax,
            regional_tax,
            social_security_tax,
            medicare_tax,
            payroll_tax,
            pre_tax_retirement_contribution: retirement,
            total_tax,
            annual_net,
            weekly_net,
            hourly_net: self.hourly_net(weekly_net, inputs.hours_per_week),
            monthly_net: annual_net / MONTHS_PER_YEAR,
            effective_tax_rate_pct: percent_of(total_tax, annual_gross),
            net_pay_ratio_pct: percent_of(annual_net, annual_gross),
        })
    }

    /// Rejects out-of-domain numeric inputs before any arithmetic runs.
    fn validate(
        &self,
        inputs: &PayInputs,
    ) -> Result<(), PayError> {
        let checks = [
            (
                NumericField::HourlyRate,
                inputs.hourly_rate,
                inputs.hourly_rate >= Decimal::ZERO,
                "a non-negative amount",
            ),
            (
                NumericField::HoursPerWeek,
                inputs.hours_per_week,
                inputs.hours_per_week >= Decimal::ZERO && inputs.hours_per_week <= HOURS_PER_WEEK_MAX,
                "between 0 and 168 hours",
            ),
            (
                NumericField::RetirementContributionPct,
                inputs.retirement_contribution_pct,
                inputs.retirement_contribution_pct >= Decimal::ZERO
                    && inputs.retirement_contribution_pct <= ONE_HUNDRED,
                "between 0 and 100 percent",
            ),
            (
                NumericField::TipsPerHour,
                inputs.tips_per_hour,
                inputs.tips_per_hour >= Decimal::ZERO,
                "a non-negative amount",
            ),
        ];

        for (field, value, valid, expected) in checks {
            if !valid {
                return Err(PayError::InvalidInput {
                    field,
                    value,
                    expected,
                });
            }
        }
        Ok(())
    }

    /// Hourly rate plus tips, when tips are included. `None` on overflow,
    /// as for the other gross steps.
    fn effective_hourly_rate(
        &self,
        hourly_rate: Decimal,
        tips_per_hour: Decimal,
        include_tips: bool,
    ) -> Option<Decimal> {
        if include_tips {
            hourly_rate.checked_add(tips_per_hour)
        } else {
            Some(hourly_rate)
        }
    }

    fn weekly_gross(
        &self,
        effective_hourly_rate: Decimal,
        hours_per_week: Decimal,
    ) -> Option<Decimal> {
        effective_hourly_rate.checked_mul(hours_per_week)
    }

    fn annual_gross(
        &self,
        weekly_gross: Decimal,
    ) -> Option<Decimal> {
        weekly_gross.checked_mul(WEEKS_PER_YEAR)
    }

    fn retirement_contribution(
        &self,
        annual_gross: Decimal,
        contribution_pct: Decimal,
    ) -> Option<Decimal> {
        annual_gross
            .checked_mul(contribution_pct)
            .map(|scaled| scaled / ONE_HUNDRED)
    }

    fn taxable_income(
        &self,
        annual_gross: Decimal,
        retirement_contribution: Decimal,
    ) -> Decimal {
        annual_gross - retirement_contribution
    }

    fn regional_tax(
        &self,
        rule: &RegionalTaxRule,
        taxable_income: Decimal,
    ) -> Decimal {
        taxable_income * rule.effective_rate()
    }

    /// Social Security stops at the wage base.
    fn social_security_tax(
        &self,
        payroll: &PayrollTaxConfig,
        annual_gross: Decimal,
    ) -> Decimal {
        annual_gross.min(payroll.social_security_wage_base) * payroll.social_security_rate
    }

    fn medicare_tax(
        &self,
        payroll: &PayrollTaxConfig,
        annual_gross: Decimal,
    ) -> Decimal {
        annual_gross * payroll.medicare_rate
    }

    /// Zero hours yields zero, not a division error.
    fn hourly_net(
        &self,
        weekly_net: Decimal,
        hours_per_week: Decimal,
    ) -> Decimal {
        if hours_per_week > Decimal::ZERO {
            weekly_net / hours_per_week
        } else {
            Decimal::ZERO
        }
    }
}
