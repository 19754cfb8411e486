//! Validated federal, payroll and regional tax data for one tax year.
//!
//! A [`TaxTable`] can only be built through [`TaxTable::new`], which checks
//! every structural invariant the calculator relies on. A table that fails
//! validation indicates a deployment or data bug and is rejected at load
//! time; nothing is re-checked per calculation.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pay_core::{OvertimeRule, PayrollTaxConfig, RegionalTaxRule, TaxBracket, TaxTable};
//!
//! let table = TaxTable::new(
//!     2025,
//!     vec![
//!         TaxBracket::new(dec!(0), Some(dec!(12150)), dec!(0.10)),
//!         TaxBracket::new(dec!(12150), None, dec!(0.12)),
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
//! assert_eq!(table.federal_brackets().len(), 2);
//! assert!(table.regional_rule(&"TX".parse().unwrap()).is_ok());
//! assert!(table.regional_rule(&"CA".parse().unwrap()).is_err());
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::PayError;
use crate::models::{PayrollTaxConfig, RegionCode, RegionalTaxRule, TaxBracket};

/// Reasons a tax table is rejected at load time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxTableError {
    /// No federal brackets were provided.
    #[error("no federal tax brackets provided")]
    NoBrackets,

    /// The lowest bracket must start at zero income.
    #[error("first bracket must start at 0, starts at {0}")]
    FirstBracketNotAtZero(Decimal),

    /// A bracket's lower bound does not equal the previous upper bound.
    #[error("bracket {index} starts at {found}, expected {expected}")]
    NotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    /// A bracket's upper bound is not above its lower bound.
    #[error("bracket {index} is empty or inverted: {min} to {max}")]
    EmptyBracket {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    /// Only the last bracket may be unbounded.
    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd(usize),

    /// The last bracket must be unbounded.
    #[error("top bracket must be unbounded")]
    MissingUnboundedTop,

    /// Marginal rates must be in [0, 1).
    #[error("bracket {index} rate must be in [0, 1), got {rate}")]
    InvalidBracketRate { index: usize, rate: Decimal },

    /// A payroll rate must be in [0, 1).
    #[error("{name} must be in [0, 1), got {rate}")]
    InvalidPayrollRate { name: &'static str, rate: Decimal },

    /// The Social Security wage base must be positive.
    #[error("social security wage base must be positive, got {0}")]
    InvalidWageBase(Decimal),

    /// No regional rules were provided.
    #[error("no regional rules provided")]
    NoRegions,

    /// The same region code appears twice.
    #[error("duplicate regional rule for '{0}'")]
    DuplicateRegion(RegionCode),

    /// A regional flat rate must be in [0, 1).
    #[error("regional rate for '{region}' must be in [0, 1), got {rate}")]
    InvalidRegionalRate { region: RegionCode, rate: Decimal },

    /// Minimum wage and unemployment wage base cannot be negative.
    #[error("regional {name} for '{region}' cannot be negative, got {value}")]
    NegativeRegionalAmount {
        region: RegionCode,
        name: &'static str,
        value: Decimal,
    },

    /// The store has no table for the requested year.
    #[error("no tax table loaded for {0}")]
    YearNotLoaded(i32),
}

/// Immutable tax data for one tax year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxTable {
    tax_year: i32,
    federal_brackets: Vec<TaxBracket>,
    payroll: PayrollTaxConfig,
    regions: BTreeMap<RegionCode, RegionalTaxRule>,
}

impl TaxTable {
    /// Builds a table after checking the bracket, payroll and regional invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxTableError`] found.
    pub fn new(
        tax_year: i32,
        federal_brackets: Vec<TaxBracket>,
        payroll: PayrollTaxConfig,
        regional_rules: Vec<RegionalTaxRule>,
    ) -> Result<Self, TaxTableError> {
        validate_brackets(&federal_brackets)?;
        validate_payroll(&payroll)?;

        if regional_rules.is_empty() {
            return Err(TaxTableError::NoRegions);
        }

        let mut regions = BTreeMap::new();
        for rule in regional_rules {
            validate_region(&rule)?;
            let code = rule.region_code.clone();
            if regions.insert(code.clone(), rule).is_some() {
                return Err(TaxTableError::DuplicateRegion(code));
            }
        }

        debug!(
            tax_year,
            brackets = federal_brackets.len(),
            regions = regions.len(),
            "tax table validated"
        );

        Ok(Self {
            tax_year,
            federal_brackets,
            payroll,
            regions,
        })
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    /// Federal brackets in ascending order; never empty, last one unbounded.
    pub fn federal_brackets(&self) -> &[TaxBracket] {
        &self.federal_brackets
    }

    pub fn payroll(&self) -> &PayrollTaxConfig {
        &self.payroll
    }

    /// Looks up the rule for a region.
    ///
    /// # Errors
    ///
    /// Returns [`PayError::UnknownRegion`] if the table has no rule for `code`.
    pub fn regional_rule(
        &self,
        code: &RegionCode,
    ) -> Result<&RegionalTaxRule, PayError> {
        self.regions
            .get(code)
            .ok_or_else(|| PayError::UnknownRegion(code.to_string()))
    }

    /// Supported region codes, sorted.
    pub fn supported_regions(&self) -> impl Iterator<Item = &RegionCode> {
        self.regions.keys()
    }

    pub fn regional_rules(&self) -> impl Iterator<Item = &RegionalTaxRule> {
        self.regions.values()
    }
}

fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), TaxTableError> {
    let first = brackets.first().ok_or(TaxTableError::NoBrackets)?;
    if !first.min_income.is_zero() {
        return Err(TaxTableError::FirstBracketNotAtZero(first.min_income));
    }

    let last_index = brackets.len() - 1;
    let mut expected_min = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.min_income != expected_min {
            return Err(TaxTableError::NotContiguous {
                index,
                expected: expected_min,
                found: bracket.min_income,
            });
        }
        if bracket.rate < Decimal::ZERO || bracket.rate >= Decimal::ONE {
            return Err(TaxTableError::InvalidBracketRate {
                index,
                rate: bracket.rate,
            });
        }
        match bracket.max_income {
            Some(max) if max <= bracket.min_income => {
                return Err(TaxTableError::EmptyBracket {
                    index,
                    min: bracket.min_income,
                    max,
                });
            }
            Some(max) => expected_min = max,
            None if index != last_index => {
                return Err(TaxTableError::UnboundedBeforeEnd(index));
            }
            None => {}
        }
    }

    if !brackets[last_index].is_unbounded() {
        return Err(TaxTableError::MissingUnboundedTop);
    }

    Ok(())
}

fn validate_payroll(payroll: &PayrollTaxConfig) -> Result<(), TaxTableError> {
    for (name, rate) in [
        ("social security rate", payroll.social_security_rate),
        ("medicare rate", payroll.medicare_rate),
    ] {
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            return Err(TaxTableError::InvalidPayrollRate { name, rate });
        }
    }
    if payroll.social_security_wage_base <= Decimal::ZERO {
        return Err(TaxTableError::InvalidWageBase(
            payroll.social_security_wage_base,
        ));
    }
    Ok(())
}

fn validate_region(rule: &RegionalTaxRule) -> Result<(), TaxTableError> {
    if rule.flat_rate < Decimal::ZERO || rule.flat_rate >= Decimal::ONE {
        return Err(TaxTableError::InvalidRegionalRate {
            region: rule.region_code.clone(),
            rate: rule.flat_rate,
        });
    }
    for (name, value) in [
        ("minimum wage", rule.minimum_wage),
        ("unemployment wage base", rule.unemployment_wage_base),
    ] {
        if value < Decimal::ZERO {
            return Err(TaxTableError::NegativeRegionalAmount {
                region: rule.region_code.clone(),
                name,
                value,
            });
        }
    }
    Ok(())
}
