//! Tax Table Provider: validated tax data and the versioned store serving it.

mod store;
mod tax_table;

pub use store::{TaxTableProvider, TaxTableStore};
pub use tax_table::{TaxTable, TaxTableError};
