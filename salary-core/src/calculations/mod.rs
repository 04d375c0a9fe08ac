//! Salary computation modules.
//!
//! The calculator converts typed components into monthly/annual amounts;
//! the pay-cycle counter drives per-day allowance proration; the defaults
//! module folds statutory components into a template's lists.

pub mod common;
pub mod defaults;
pub mod pay_cycle;
pub mod template_calc;

pub use defaults::merge_defaults;
pub use pay_cycle::days_in_cycle;
pub use template_calc::{ComponentAmounts, TemplateBreakdown, TemplateCalculator};
