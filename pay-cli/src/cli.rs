use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pay_core::Scenario;
use rust_decimal::Decimal;

use crate::utils::parse_decimal;
use crate::what_if::parse_scenario;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Take-home pay estimator for hourly workers.
///
/// Applies federal brackets, a flat regional income tax, Social Security and
/// Medicare to an hourly wage, and shows how what-if changes move net pay.
#[derive(Debug, Parser)]
#[command(name = "paycheck", version, about)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of tax table CSVs (overrides the config file).
    #[arg(long, global = true)]
    pub tables: Option<PathBuf>,

    /// Tax year to calculate against (default: latest loaded).
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// Log filter, e.g. `info` or `pay_core=debug`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Hide log output on the console.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate take-home pay, optionally with what-if scenarios.
    Estimate(EstimateArgs),
    /// List the regions in the active tax tables.
    Regions,
}

#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// Hourly wage, e.g. `15` or `$15.50`.
    #[arg(long, value_parser = parse_decimal)]
    pub rate: Decimal,

    /// Hours worked per week (0 to 168).
    #[arg(long, value_parser = parse_decimal)]
    pub hours: Decimal,

    /// Two-letter state code, e.g. `TX`.
    #[arg(long)]
    pub region: String,

    /// Average tips per hour.
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub tips_per_hour: Decimal,

    /// Count tips toward gross pay.
    #[arg(long)]
    pub include_tips: bool,

    /// Pre-tax retirement contribution, percent of gross (0 to 100).
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub retirement_pct: Decimal,

    /// Evaluate the configured scenario catalog.
    #[arg(long)]
    pub scenarios: bool,

    /// Ad-hoc scenario such as `hourly_rate+=2` or `region=WA`. Repeatable.
    #[arg(long = "what-if", value_name = "EXPR", value_parser = parse_scenario)]
    pub what_if: Vec<Scenario>,

    /// Keep scenarios that cannot change the result for these inputs.
    #[arg(long)]
    pub keep_redundant: bool,

    /// Order scenarios by annual gain instead of catalog order.
    #[arg(long)]
    pub rank: bool,
}
