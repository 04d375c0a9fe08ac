use std::str::FromStr;

use rust_decimal::Decimal;
use salary_core::{CalculationKind, NewSalaryTemplate, PayrollSettings, SalaryComponent};

/// One editable component row of the template form.
#[derive(Debug, Clone, Default)]
pub struct ComponentRow {
    pub name: String,
    pub calculation_type: String,
    pub value: String,
    pub earning: bool,
}

impl ComponentRow {
    pub fn earning(name: &str, calculation_type: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            calculation_type: calculation_type.to_string(),
            value: value.to_string(),
            earning: true,
        }
    }

    pub fn deduction(name: &str, calculation_type: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            calculation_type: calculation_type.to_string(),
            value: value.to_string(),
            earning: false,
        }
    }
}

/// Form state for creating/editing a salary template.
///
/// All fields are raw strings until [`TemplateForm::validate`] parses them
/// into a [`NewSalaryTemplate`], collecting every problem into `errors`
/// rather than stopping at the first.
#[derive(Debug, Clone, Default)]
pub struct TemplateForm {
    pub template_name: String,
    pub description: String,
    pub annual_ctc: String,
    pub components: Vec<ComponentRow>,
    pub per_day_allowance: String,
    pub pg_rent: String,

    // Validation errors
    pub errors: Vec<String>,
}

impl TemplateForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills the form from the payroll settings feed: its CTC and its
    /// earning/deduction component lists become the starting rows.
    pub fn from_settings(settings: &PayrollSettings) -> Self {
        let mut components = Vec::new();
        for c in &settings.earnings {
            components.push(ComponentRow {
                name: c.name.clone(),
                calculation_type: c.kind.as_str().to_string(),
                value: c.value.to_string(),
                earning: true,
            });
        }
        for c in &settings.deductions {
            components.push(ComponentRow {
                name: c.name.clone(),
                calculation_type: c.kind.as_str().to_string(),
                value: c.value.to_string(),
                earning: false,
            });
        }

        Self {
            annual_ctc: settings.annual_ctc.to_string(),
            components,
            ..Self::default()
        }
    }

    /// Parse the form into a [`NewSalaryTemplate`], returning `Err(())` with
    /// the problems accumulated in `self.errors` when anything is invalid.
    pub fn validate(&mut self) -> Result<NewSalaryTemplate, ()> {
        let mut errors = Vec::new();

        let template_name = self.template_name.trim();
        if template_name.is_empty() {
            errors.push("Template Name is required".to_string());
        }

        let annual_ctc = parse_decimal_required(&mut errors, "Annual CTC", &self.annual_ctc);

        let mut earnings = Vec::new();
        let mut deductions = Vec::new();
        for row in &self.components {
            let Some(component) = parse_component(&mut errors, row) else {
                continue;
            };
            if row.earning {
                earnings.push(component);
            } else {
                deductions.push(component);
            }
        }

        let per_day_allowance =
            parse_decimal_optional(&mut errors, "Per Day Allowance", &self.per_day_allowance);
        let pg_rent = parse_decimal_optional(&mut errors, "PG Rent", &self.pg_rent);

        self.errors = errors;
        if !self.errors.is_empty() {
            return Err(());
        }

        Ok(NewSalaryTemplate {
            template_name: template_name.to_string(),
            description: self.description.trim().to_string(),
            annual_ctc: annual_ctc.unwrap(),
            earnings,
            deductions,
            per_day_allowance: per_day_allowance.unwrap_or(Decimal::ZERO),
            pg_rent: pg_rent.unwrap_or(Decimal::ZERO),
        })
    }
}

fn parse_component(
    errors: &mut Vec<String>,
    row: &ComponentRow,
) -> Option<SalaryComponent> {
    let name = row.name.trim();
    if name.is_empty() {
        errors.push("Component name is required".to_string());
        return None;
    }

    let kind = match CalculationKind::parse(row.calculation_type.trim()) {
        Some(kind) => kind,
        None => {
            errors.push(format!(
                "{} has an unknown calculation type '{}'",
                name, row.calculation_type
            ));
            return None;
        }
    };

    let value = parse_decimal_required(errors, name, &row.value)?;

    Some(SalaryComponent {
        name: name.to_string(),
        kind,
        value,
    })
}

fn parse_decimal_required(
    errors: &mut Vec<String>,
    field: &str,
    value: &str,
) -> Option<Decimal> {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
        return None;
    }
    match Decimal::from_str(value.trim()) {
        Ok(v) => Some(v),
        Err(_) => {
            errors.push(format!("{field} must be a valid number"));
            None
        }
    }
}

/// An empty field means zero; a non-empty field still has to parse.
fn parse_decimal_optional(
    errors: &mut Vec<String>,
    field: &str,
    value: &str,
) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match Decimal::from_str(trimmed) {
        Ok(v) => Some(v),
        Err(_) => {
            errors.push(format!("{field} must be a valid number"));
            None
        }
    }
}
