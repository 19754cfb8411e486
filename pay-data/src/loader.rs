use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use pay_core::{
    OvertimeRule, PayrollTaxConfig, RegionCode, RegionalTaxRule, TaxBracket, TaxTable, TaxTableError,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

/// Tax year of the tables compiled into the crate.
pub const BUILTIN_TAX_YEAR: i32 = 2025;

pub const BRACKETS_FILE: &str = "federal_brackets.csv";
pub const PAYROLL_FILE: &str = "payroll.csv";
pub const REGIONS_FILE: &str = "regions.csv";

const BUILTIN_BRACKETS: &str = include_str!("../data/2025/federal_brackets.csv");
const BUILTIN_PAYROLL: &str = include_str!("../data/2025/payroll.csv");
const BUILTIN_REGIONS: &str = include_str!("../data/2025/regions.csv");

/// Errors that can occur when loading tax tables.
#[derive(Debug, Error)]
pub enum TaxTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown overtime rule '{0}' (expected 'federal' or 'daily_and_weekly')")]
    UnknownOvertimeRule(String),

    #[error("invalid region code '{0}'")]
    InvalidRegionCode(String),

    #[error("no payroll parameters for tax year {0}")]
    MissingPayroll(i32),

    #[error("more than one payroll row for tax year {0}")]
    DuplicatePayroll(i32),

    #[error("invalid tax table: {0}")]
    Table(#[from] TaxTableError),
}

impl From<csv::Error> for TaxTableLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxTableLoaderError::CsvParse(err.to_string())
    }
}

/// A row of `federal_brackets.csv`.
///
/// - `tax_year`: the tax year (e.g., 2025)
/// - `min_income`: lower bound of the bracket
/// - `max_income`: upper bound (empty for the unbounded top bracket)
/// - `rate`: marginal rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

/// A row of `payroll.csv`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PayrollRecord {
    pub tax_year: i32,
    pub social_security_rate: Decimal,
    pub social_security_wage_base: Decimal,
    pub medicare_rate: Decimal,
}

/// A row of `regions.csv`.
///
/// `region_code` is case-insensitive; `overtime_rule` is `federal` or
/// `daily_and_weekly`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RegionRecord {
    pub tax_year: i32,
    pub region_code: String,
    pub region_name: String,
    pub no_income_tax: bool,
    pub flat_rate: Decimal,
    pub minimum_wage: Decimal,
    pub unemployment_wage_base: Decimal,
    pub overtime_rule: String,
}

impl RegionRecord {
    fn into_rule(self) -> Result<RegionalTaxRule, TaxTableLoaderError> {
        let region_code: RegionCode = self
            .region_code
            .parse()
            .map_err(|_| TaxTableLoaderError::InvalidRegionCode(self.region_code.clone()))?;
        let overtime_rule = OvertimeRule::parse(&self.overtime_rule)
            .ok_or_else(|| TaxTableLoaderError::UnknownOvertimeRule(self.overtime_rule.clone()))?;

        Ok(RegionalTaxRule {
            region_code,
            region_name: self.region_name,
            no_income_tax: self.no_income_tax,
            flat_rate: self.flat_rate,
            minimum_wage: self.minimum_wage,
            unemployment_wage_base: self.unemployment_wage_base,
            overtime_rule,
        })
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<Decimal>().map(Some).map_err(serde::de::Error::custom),
    }
}

fn parse_records<T, R>(reader: R) -> Result<Vec<T>, TaxTableLoaderError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: T = result?;
        records.push(record);
    }

    Ok(records)
}

fn open(path: &Path) -> Result<File, TaxTableLoaderError> {
    File::open(path).map_err(|source| TaxTableLoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn bracket_years(brackets: &[BracketRecord]) -> Vec<i32> {
    let years: BTreeSet<i32> = brackets.iter().map(|r| r.tax_year).collect();
    years.into_iter().collect()
}

/// Every row of a tables directory, all years.
struct DirRecords {
    brackets: Vec<BracketRecord>,
    payroll: Vec<PayrollRecord>,
    regions: Vec<RegionRecord>,
}

impl DirRecords {
    fn read(dir: &Path) -> Result<Self, TaxTableLoaderError> {
        Ok(Self {
            brackets: TaxTableLoader::parse_brackets(open(&dir.join(BRACKETS_FILE))?)?,
            payroll: TaxTableLoader::parse_payroll(open(&dir.join(PAYROLL_FILE))?)?,
            regions: TaxTableLoader::parse_regions(open(&dir.join(REGIONS_FILE))?)?,
        })
    }
}

/// Loader for tax tables from CSV files.
///
/// A tables directory holds three files, each keyed by `tax_year` so that
/// several years can share one directory:
/// `federal_brackets.csv`, `payroll.csv` and `regions.csv`.
pub struct TaxTableLoader;

impl TaxTableLoader {
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, TaxTableLoaderError> {
        parse_records(reader)
    }

    pub fn parse_payroll<R: Read>(reader: R) -> Result<Vec<PayrollRecord>, TaxTableLoaderError> {
        parse_records(reader)
    }

    pub fn parse_regions<R: Read>(reader: R) -> Result<Vec<RegionRecord>, TaxTableLoaderError> {
        parse_records(reader)
    }

    /// Builds the validated table for `tax_year` from parsed records.
    ///
    /// Rows for other years are ignored. A year with no bracket or region rows
    /// fails table validation.
    pub fn build(
        tax_year: i32,
        brackets: Vec<BracketRecord>,
        payroll: Vec<PayrollRecord>,
        regions: Vec<RegionRecord>,
    ) -> Result<TaxTable, TaxTableLoaderError> {
        let federal_brackets: Vec<TaxBracket> = brackets
            .into_iter()
            .filter(|r| r.tax_year == tax_year)
            .map(|r| TaxBracket::new(r.min_income, r.max_income, r.rate))
            .collect();

        let mut payroll_rows = payroll.into_iter().filter(|r| r.tax_year == tax_year);
        let payroll = payroll_rows
            .next()
            .ok_or(TaxTableLoaderError::MissingPayroll(tax_year))?;
        if payroll_rows.next().is_some() {
            return Err(TaxTableLoaderError::DuplicatePayroll(tax_year));
        }

        let rules = regions
            .into_iter()
            .filter(|r| r.tax_year == tax_year)
            .map(RegionRecord::into_rule)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            tax_year,
            brackets = federal_brackets.len(),
            regions = rules.len(),
            "building tax table"
        );

        let table = TaxTable::new(
            tax_year,
            federal_brackets,
            PayrollTaxConfig {
                social_security_rate: payroll.social_security_rate,
                social_security_wage_base: payroll.social_security_wage_base,
                medicare_rate: payroll.medicare_rate,
            },
            rules,
        )?;
        Ok(table)
    }

    /// Loads the table for `tax_year` from the three CSV files in `dir`.
    pub fn load_dir(
        dir: &Path,
        tax_year: i32,
    ) -> Result<TaxTable, TaxTableLoaderError> {
        let records = DirRecords::read(dir)?;

        let table = Self::build(tax_year, records.brackets, records.payroll, records.regions)?;
        info!(dir = %dir.display(), tax_year, "loaded tax table");
        Ok(table)
    }

    /// Tax years that have federal brackets in `dir`, ascending.
    pub fn years_in_dir(dir: &Path) -> Result<Vec<i32>, TaxTableLoaderError> {
        let brackets = Self::parse_brackets(open(&dir.join(BRACKETS_FILE))?)?;
        Ok(bracket_years(&brackets))
    }

    /// Loads every tax year found in `dir`, reading each file once.
    pub fn load_all(dir: &Path) -> Result<Vec<TaxTable>, TaxTableLoaderError> {
        let records = DirRecords::read(dir)?;

        bracket_years(&records.brackets)
            .into_iter()
            .map(|year| {
                let table = Self::build(
                    year,
                    records.brackets.clone(),
                    records.payroll.clone(),
                    records.regions.clone(),
                )?;
                info!(dir = %dir.display(), tax_year = year, "loaded tax table");
                Ok(table)
            })
            .collect()
    }

    /// Parses the tables compiled into the crate.
    pub fn builtin() -> Result<TaxTable, TaxTableLoaderError> {
        Self::build(
            BUILTIN_TAX_YEAR,
            Self::parse_brackets(BUILTIN_BRACKETS.as_bytes())?,
            Self::parse_payroll(BUILTIN_PAYROLL.as_bytes())?,
            Self::parse_regions(BUILTIN_REGIONS.as_bytes())?,
        )
    }
}
