use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One federal marginal bracket.
///
/// `max_income` of `None` marks the unbounded top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            rate,
        }
    }

    /// Width of the bracket, or `None` for the unbounded top bracket.
    pub fn width(&self) -> Option<Decimal> {
        self.max_income.map(|max| max - self.min_income)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_income.is_none()
    }
}
