mod pay_breakdown;
mod pay_inputs;
mod payroll;
mod region_code;
mod regional_rule;
mod scenario;
mod tax_bracket;

pub use pay_breakdown::PayBreakdown;
pub use pay_inputs::{NumericField, PayInputs};
pub use payroll::PayrollTaxConfig;
pub use region_code::RegionCode;
pub use regional_rule::{OvertimeRule, RegionalTaxRule};
pub use scenario::{Adjustment, Scenario};
pub use tax_bracket::TaxBracket;
