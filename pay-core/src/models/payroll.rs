use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee-side FICA parameters for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTaxConfig {
    /// Employee Social Security rate (6.2% for 2025).
    pub social_security_rate: Decimal,
    /// Earnings above this amount are not subject to Social Security tax.
    pub social_security_wage_base: Decimal,
    /// Employee Medicare rate (1.45%), applied to all wages.
    pub medicare_rate: Decimal,
}
