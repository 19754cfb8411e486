use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::NumericField;

/// Errors a paycheck calculation can fail with.
///
/// Both are caller errors and recoverable: re-validate the inputs or ask for
/// a different region. Neither is ever replaced by a default.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayError {
    /// A numeric input is outside its domain.
    #[error("invalid {field} {value}: expected {expected}")]
    InvalidInput {
        field: NumericField,
        value: Decimal,
        expected: &'static str,
    },

    /// The region code is malformed or has no rule in the tax table.
    #[error("unknown region '{0}'")]
    UnknownRegion(String),
}
