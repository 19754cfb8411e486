//! Integration tests for loading tax tables from on-disk CSV fixtures.

use std::path::{Path, PathBuf};

use pay_core::{PayInputs, PaycheckCalculator, TaxTableError, TaxTableProvider, TaxTableStore};
use pay_data::{TaxTableLoader, TaxTableLoaderError};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data").join(name)
}

#[test]
fn test_load_dir_for_each_year() {
    let dir = fixture("tables");

    let t2024 = TaxTableLoader::load_dir(&dir, 2024).expect("2024 should load");
    let t2025 = TaxTableLoader::load_dir(&dir, 2025).expect("2025 should load");

    assert_eq!(t2024.federal_brackets()[1].min_income, dec!(11600));
    assert_eq!(t2024.payroll().social_security_wage_base, dec!(168600));
    assert_eq!(t2025.federal_brackets()[1].min_income, dec!(12150));
    assert_eq!(t2025.payroll().social_security_wage_base, dec!(176100));
}

#[test]
fn test_load_dir_normalizes_region_codes() {
    let table = TaxTableLoader::load_dir(&fixture("tables"), 2025).unwrap();

    let codes: Vec<&str> = table.supported_regions().map(|c| c.as_str()).collect();

    assert_eq!(codes, vec!["CA", "TX", "WA"]);
}

#[test]
fn test_years_in_dir() {
    let years = TaxTableLoader::years_in_dir(&fixture("tables")).unwrap();

    assert_eq!(years, vec![2024, 2025]);
}

#[test]
fn test_load_all_feeds_a_store() {
    let tables = TaxTableLoader::load_all(&fixture("tables")).unwrap();
    let mut tables = tables.into_iter();
    let store = TaxTableStore::new(tables.next().unwrap());
    for table in tables {
        store.install(table);
    }
    store.set_current_year(2025).unwrap();
    let inputs = PayInputs::new(dec!(15), dec!(40), "TX".parse().unwrap());

    let snapshot = store.snapshot();
    let breakdown = PaycheckCalculator::new(&snapshot).calculate(&inputs).unwrap();

    assert_eq!(store.years(), vec![2024, 2025]);
    assert_eq!(breakdown.federal_tax, dec!(3501));
}

#[test]
fn test_load_all_matches_per_year_loads() {
    let dir = fixture("tables");

    let all = TaxTableLoader::load_all(&dir).unwrap();

    assert_eq!(
        all,
        vec![
            TaxTableLoader::load_dir(&dir, 2024).unwrap(),
            TaxTableLoader::load_dir(&dir, 2025).unwrap(),
        ]
    );
}

#[test]
fn test_load_all_rejects_bracket_gap() {
    let result = TaxTableLoader::load_all(&fixture("gapped"));

    assert!(matches!(
        result,
        Err(TaxTableLoaderError::Table(TaxTableError::NotContiguous { index: 1, .. }))
    ));
}

#[test]
fn test_load_dir_missing_year() {
    let result = TaxTableLoader::load_dir(&fixture("tables"), 2019);

    assert!(matches!(result, Err(TaxTableLoaderError::MissingPayroll(2019))));
}

#[test]
fn test_load_dir_missing_directory() {
    let result = TaxTableLoader::load_dir(&fixture("does-not-exist"), 2025);

    match result {
        Err(TaxTableLoaderError::Io { path, .. }) => assert!(path.ends_with("federal_brackets.csv")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_load_dir_rejects_bracket_gap() {
    let result = TaxTableLoader::load_dir(&fixture("gapped"), 2025);

    match result {
        Err(TaxTableLoaderError::Table(TaxTableError::NotContiguous { index, expected, found })) => {
            assert_eq!(index, 1);
            assert_eq!(expected, dec!(12150));
            assert_eq!(found, dec!(12200));
        }
        other => panic!("expected NotContiguous, got {other:?}"),
    }
}

#[test]
fn test_builtin_matches_shipped_files() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/2025");

    let from_disk = TaxTableLoader::load_dir(&dir, 2025).unwrap();
    let builtin = TaxTableLoader::builtin().unwrap();

    assert_eq!(from_disk, builtin);
}
