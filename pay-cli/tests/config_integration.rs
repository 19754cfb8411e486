//! Integration tests that drive the CLI pieces from on-disk fixtures.

use std::path::{Path, PathBuf};

use clap::Parser;
use pay_cli::app;
use pay_cli::cli::{Cli, Command};
use pay_cli::config::{AppConfig, ConfigError};
use pay_core::TaxTableProvider;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn tables_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../pay-data/test-data/tables")
}

#[test]
fn test_load_fixture_config() {
    let config = AppConfig::load(&fixture_path("paycheck.toml")).expect("fixture config should load");

    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.stdout);
    assert_eq!(config.tables.year, Some(2024));
    assert_eq!(config.scenarios.len(), 3);
    assert_eq!(config.scenario_catalog().unwrap().len(), 3);
}

#[test]
fn test_broken_config_names_the_file() {
    let err = AppConfig::load(&fixture_path("broken.toml")).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn test_missing_config_is_a_read_error() {
    let err = AppConfig::load(&fixture_path("nope.toml")).unwrap_err();

    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_store_from_directory_selects_year() {
    let mut config = AppConfig::load(&fixture_path("paycheck.toml")).unwrap();
    config.tables.dir = Some(tables_dir());

    let store = app::build_store(&config.tables).unwrap();

    assert_eq!(store.years(), vec![2024, 2025]);
    assert_eq!(store.current_year(), 2024);
    assert_eq!(store.snapshot().payroll().social_security_wage_base, dec!(168600));
}

#[test]
fn test_store_defaults_to_latest_year_in_directory() {
    let mut config = AppConfig::default();
    config.tables.dir = Some(tables_dir());

    let store = app::build_store(&config.tables).unwrap();

    assert_eq!(store.current_year(), 2025);
}

#[test]
fn test_estimate_with_fixture_scenarios() {
    let mut config = AppConfig::load(&fixture_path("paycheck.toml")).unwrap();
    config.tables.dir = Some(tables_dir());
    let store = app::build_store(&config.tables).unwrap();
    let cli = Cli::try_parse_from([
        "paycheck",
        "estimate",
        "--rate",
        "15",
        "--hours",
        "40",
        "--region",
        "TX",
        "--scenarios",
        "--what-if",
        "region=WA",
    ])
    .unwrap();
    let Command::Estimate(args) = cli.command else {
        panic!("expected estimate command");
    };

    let output = app::run_estimate(&store, &args, &config.scenario_catalog().unwrap()).unwrap();

    assert!(output.contains("2024 tax tables"));
    assert!(output.contains("+$3/hr raise"));
    assert!(output.contains("Move to California"));
    // The 2024 fixture tables have no Washington rule.
    assert!(output.contains("skipped region=WA: unknown region 'WA'"));
    // 40 + 80 hours is still within a week.
    assert!(output.contains("Work 80 more hours"));
}
