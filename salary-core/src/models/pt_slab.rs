use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A professional-tax slab: a flat monthly deduction for salaries inside
/// the slab's range. Only slabs marked active participate in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtSlab {
    pub id: i64,
    pub min_salary: Decimal,
    pub max_salary: Option<Decimal>,
    pub amount: Decimal,
    pub active: bool,
}
