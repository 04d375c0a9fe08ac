use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SalaryComponent;

/// Payroll settings as served by the backend: the starting component
/// lists and the statutory rates a fresh template is seeded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    pub annual_ctc: Decimal,
    /// Provident Fund rate, percentage of Basic.
    pub pf_rate: Decimal,
    /// Employee State Insurance rate, percentage of CTC.
    pub esi_rate: Decimal,
    pub earnings: Vec<SalaryComponent>,
    pub deductions: Vec<SalaryComponent>,
}

impl Default for PayrollSettings {
    /// The empty state a failed settings fetch degrades to.
    fn default() -> Self {
        Self {
            annual_ctc: Decimal::ZERO,
            pf_rate: Decimal::ZERO,
            esi_rate: Decimal::ZERO,
            earnings: Vec::new(),
            deductions: Vec::new(),
        }
    }
}
