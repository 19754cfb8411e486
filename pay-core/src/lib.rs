pub mod calculations;
mod error;
pub mod models;
pub mod tables;

#[cfg(test)]
mod test_support;

pub use calculations::{
    PaycheckCalculator, ScenarioError, ScenarioEvaluator, ScenarioResult, federal_income_tax,
    rank_by_annual_delta,
};
pub use error::PayError;
pub use models::*;
pub use tables::{TaxTable, TaxTableError, TaxTableProvider, TaxTableStore};
