//! Flat wire format exchanged with the payroll backend.
//!
//! The backend speaks a single `components[]` list of named entries tagged
//! with a calculation-type code, while the form model keeps separate
//! earning/deduction lists and dedicated allowance fields. This module is
//! the one place those shapes meet: the wire payload is parsed and
//! validated here, and nothing downstream ever re-inspects raw codes.
//!
//! Ordering on the wire is earnings first, deductions second; no further
//! ordering is guaranteed or relied upon.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::TemplateCalculator;
use crate::models::{
    CalculationKind, NewSalaryTemplate, SalaryComponent, SalaryTemplate,
};

/// Errors raised when normalizing a wire payload into the typed model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// The payload carried no template id where one was required.
    #[error("wire template has no id")]
    MissingTemplateId,

    /// A component carried a calculation-type code this client does not know.
    #[error("unknown calculation type on component '{component}'")]
    UnknownCalculationType { component: String },
}

/// Calculation-type code as it appears on the wire.
///
/// Unrecognized codes deserialize to [`WireCalculationType::Unknown`]
/// instead of failing the whole payload; strict conversion then rejects
/// them one component at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireCalculationType {
    #[serde(rename = "FIXED")]
    Fixed,
    #[serde(rename = "PERCENTAGE")]
    Percentage,
    #[serde(rename = "BASICPERCENTAGE")]
    BasicPercentage,
    #[serde(other)]
    Unknown,
}

impl WireCalculationType {
    fn to_kind(self) -> Option<CalculationKind> {
        match self {
            Self::Fixed => Some(CalculationKind::Fixed),
            Self::Percentage => Some(CalculationKind::PercentOfCtc),
            Self::BasicPercentage => Some(CalculationKind::PercentOfBasic),
            Self::Unknown => None,
        }
    }

    fn from_kind(kind: CalculationKind) -> Self {
        match kind {
            CalculationKind::Fixed => Self::Fixed,
            CalculationKind::PercentOfCtc => Self::Percentage,
            CalculationKind::PercentOfBasic => Self::BasicPercentage,
        }
    }
}

/// One flat component entry of the save/load payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireComponent {
    pub component_name: String,
    pub calculation_type: WireCalculationType,
    pub value: Decimal,
    pub monthly_amount: Decimal,
    pub annual_amount: Decimal,
    pub earning: bool,
}

/// The flat template payload. Per-day allowance and PG rent travel as
/// dedicated fields, never as generic components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub template_name: String,
    pub description: String,
    pub annual_ctc: Decimal,
    pub per_day_allowance: Decimal,
    pub pg_rent: Decimal,
    pub components: Vec<WireComponent>,
}

fn flatten(
    calc: &TemplateCalculator,
    annual_ctc: Decimal,
    earnings: &[SalaryComponent],
    deductions: &[SalaryComponent],
) -> Vec<WireComponent> {
    let entry = |c: &SalaryComponent, earning: bool| WireComponent {
        component_name: c.name.clone(),
        calculation_type: WireCalculationType::from_kind(c.kind),
        value: c.value,
        monthly_amount: calc.monthly_amount(c, annual_ctc),
        annual_amount: calc.annual_amount(c, annual_ctc),
        earning,
    };

    let mut components: Vec<WireComponent> =
        earnings.iter().map(|c| entry(c, true)).collect();
    components.extend(deductions.iter().map(|c| entry(c, false)));
    components
}

/// Flattens a saved template into the wire payload, filling the
/// per-component monthly/annual amounts from the calculator.
pub fn to_wire(
    template: &SalaryTemplate,
    calc: &TemplateCalculator,
) -> WireTemplate {
    WireTemplate {
        id: Some(template.id),
        template_name: template.template_name.clone(),
        description: template.description.clone(),
        annual_ctc: template.annual_ctc,
        per_day_allowance: template.per_day_allowance,
        pg_rent: template.pg_rent,
        components: flatten(
            calc,
            template.annual_ctc,
            &template.earnings,
            &template.deductions,
        ),
    }
}

/// Flattens a not-yet-saved template (no id on the wire).
pub fn to_wire_new(
    template: &NewSalaryTemplate,
    calc: &TemplateCalculator,
) -> WireTemplate {
    WireTemplate {
        id: None,
        template_name: template.template_name.clone(),
        description: template.description.clone(),
        annual_ctc: template.annual_ctc,
        per_day_allowance: template.per_day_allowance,
        pg_rent: template.pg_rent,
        components: flatten(
            calc,
            template.annual_ctc,
            &template.earnings,
            &template.deductions,
        ),
    }
}

fn split_components(
    components: &[WireComponent],
    mut on_unknown: impl FnMut(&WireComponent) -> Result<(), WireError>,
) -> Result<(Vec<SalaryComponent>, Vec<SalaryComponent>), WireError> {
    let mut earnings = Vec::new();
    let mut deductions = Vec::new();

    for wc in components {
        let Some(kind) = wc.calculation_type.to_kind() else {
            on_unknown(wc)?;
            continue;
        };
        let component = SalaryComponent {
            name: wc.component_name.clone(),
            kind,
            value: wc.value,
        };
        if wc.earning {
            earnings.push(component);
        } else {
            deductions.push(component);
        }
    }

    Ok((earnings, deductions))
}

/// Strict normalization of a loaded template payload.
///
/// # Errors
///
/// * [`WireError::MissingTemplateId`] — the payload has no id.
/// * [`WireError::UnknownCalculationType`] — a component carries a code
///   this client does not understand.
pub fn from_wire(wire: &WireTemplate) -> Result<SalaryTemplate, WireError> {
    let id = wire.id.ok_or(WireError::MissingTemplateId)?;
    let (earnings, deductions) = split_components(&wire.components, |wc| {
        Err(WireError::UnknownCalculationType {
            component: wc.component_name.clone(),
        })
    })?;

    Ok(SalaryTemplate {
        id,
        template_name: wire.template_name.clone(),
        description: wire.description.clone(),
        annual_ctc: wire.annual_ctc,
        earnings,
        deductions,
        per_day_allowance: wire.per_day_allowance,
        pg_rent: wire.pg_rent,
    })
}

/// Strict normalization of a payload that has not been saved yet.
pub fn from_wire_new(wire: &WireTemplate) -> Result<NewSalaryTemplate, WireError> {
    let (earnings, deductions) = split_components(&wire.components, |wc| {
        Err(WireError::UnknownCalculationType {
            component: wc.component_name.clone(),
        })
    })?;

    Ok(NewSalaryTemplate {
        template_name: wire.template_name.clone(),
        description: wire.description.clone(),
        annual_ctc: wire.annual_ctc,
        earnings,
        deductions,
        per_day_allowance: wire.per_day_allowance,
        pg_rent: wire.pg_rent,
    })
}

/// Lenient normalization for feeds this client does not own: components
/// with unknown calculation types are dropped with a warning, so their
/// contribution to any total is zero rather than an aborted load.
pub fn from_wire_lenient(wire: &WireTemplate) -> Result<SalaryTemplate, WireError> {
    let id = wire.id.ok_or(WireError::MissingTemplateId)?;
    let (earnings, deductions) = split_components(&wire.components, |wc| {
        warn!(
            component = %wc.component_name,
            "dropping component with unknown calculation type"
        );
        Ok(())
    })?;

    Ok(SalaryTemplate {
        id,
        template_name: wire.template_name.clone(),
        description: wire.description.clone(),
        annual_ctc: wire.annual_ctc,
        earnings,
        deductions,
        per_day_allowance: wire.per_day_allowance,
        pg_rent: wire.pg_rent,
    })
}
