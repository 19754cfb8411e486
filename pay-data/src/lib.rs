//! Tax table data: CSV loaders and the tables shipped with the crate.

mod loader;

pub use loader::{
    BRACKETS_FILE, BUILTIN_TAX_YEAR, BracketRecord, PAYROLL_FILE, PayrollRecord, REGIONS_FILE, RegionRecord,
    TaxTableLoader, TaxTableLoaderError,
};
