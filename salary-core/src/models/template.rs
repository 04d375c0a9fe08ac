use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SalaryComponent;

/// A salary template as held by the form: named earning/deduction lists
/// over an annual CTC, plus the two location-sourced allowance overrides.
///
/// Per-day allowance and PG rent are deliberately not members of the
/// component lists; they are merged into the flat wire payload at
/// save/export time and reconstituted from dedicated fields on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryTemplate {
    pub id: i64,
    pub template_name: String,
    pub description: String,
    pub annual_ctc: Decimal,
    pub earnings: Vec<SalaryComponent>,
    pub deductions: Vec<SalaryComponent>,
    /// Flat daily amount, scaled by the pay-cycle day count each month.
    pub per_day_allowance: Decimal,
    /// Flat monthly amount, never day-scaled.
    pub pg_rent: Decimal,
}

/// For creating new templates (no id yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSalaryTemplate {
    pub template_name: String,
    pub description: String,
    pub annual_ctc: Decimal,
    pub earnings: Vec<SalaryComponent>,
    pub deductions: Vec<SalaryComponent>,
    pub per_day_allowance: Decimal,
    pub pg_rent: Decimal,
}

impl NewSalaryTemplate {
    pub fn into_template(self, id: i64) -> SalaryTemplate {
        SalaryTemplate {
            id,
            template_name: self.template_name,
            description: self.description,
            annual_ctc: self.annual_ctc,
            earnings: self.earnings,
            deductions: self.deductions,
            per_day_allowance: self.per_day_allowance,
            pg_rent: self.pg_rent,
        }
    }
}
