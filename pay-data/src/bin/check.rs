use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pay_core::TaxTable;
use pay_data::TaxTableLoader;

/// Validate a directory of tax table CSV files.
///
/// The directory must contain:
/// - federal_brackets.csv: tax_year, min_income, max_income, rate
/// - payroll.csv: tax_year, social_security_rate, social_security_wage_base, medicare_rate
/// - regions.csv: tax_year, region_code, region_name, no_income_tax, flat_rate,
///   minimum_wage, unemployment_wage_base, overtime_rule
#[derive(Parser, Debug)]
#[command(name = "pay-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing the tax table CSV files
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Only check this tax year (default: every year in the directory)
    #[arg(short, long)]
    year: Option<i32>,
}

fn summarize(table: &TaxTable) {
    let top = table
        .federal_brackets()
        .last()
        .map(|b| b.rate)
        .unwrap_or_default();
    let exempt = table.regional_rules().filter(|r| r.no_income_tax).count();

    println!(
        "  {}: {} federal brackets (top rate {}), Social Security wage base {}, {} regions ({} without income tax)",
        table.tax_year(),
        table.federal_brackets().len(),
        top,
        table.payroll().social_security_wage_base,
        table.supported_regions().count(),
        exempt,
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    let Some(dir) = &args.dir else {
        let table = TaxTableLoader::builtin().context("Built-in tax tables are invalid")?;
        println!("Built-in tables OK:");
        summarize(&table);
        return Ok(());
    };

    println!("Checking tax tables in: {}", dir.display());

    let tables = match args.year {
        Some(year) => vec![
            TaxTableLoader::load_dir(dir, year)
                .with_context(|| format!("Tax year {year} in {} is invalid", dir.display()))?,
        ],
        None => TaxTableLoader::load_all(dir)
            .with_context(|| format!("Failed to load tax tables from: {}", dir.display()))?,
    };

    if tables.is_empty() {
        anyhow::bail!("No tax years found in {}", dir.display());
    }

    for table in &tables {
        summarize(table);
    }
    println!("{} tax year(s) OK.", tables.len());

    Ok(())
}
