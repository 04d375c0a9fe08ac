use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a salary component's monthly amount is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationKind {
    /// `value` is a flat monthly amount.
    Fixed,
    /// `value` is a percentage of annual CTC.
    PercentOfCtc,
    /// `value` is a percentage of the Basic component (itself a share of CTC).
    PercentOfBasic,
}

impl CalculationKind {
    /// Canonical wire code for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "FIXED",
            Self::PercentOfCtc => "PERCENTAGE",
            Self::PercentOfBasic => "BASICPERCENTAGE",
        }
    }

    /// Parses a wire code. Case-insensitive on input; unknown codes yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIXED" => Some(Self::Fixed),
            "PERCENTAGE" => Some(Self::PercentOfCtc),
            "BASICPERCENTAGE" => Some(Self::PercentOfBasic),
            _ => None,
        }
    }
}

/// One earning or deduction line of a salary template.
///
/// `value` is interpreted through `kind`: a monthly amount for
/// [`CalculationKind::Fixed`], a percentage for the other two kinds.
/// Holding a single value field keeps the "exactly one of
/// amount/percentage is active" rule structural instead of conventional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponent {
    pub name: String,
    pub kind: CalculationKind,
    pub value: Decimal,
}

impl SalaryComponent {
    pub fn fixed(name: impl Into<String>, monthly_amount: Decimal) -> Self {
        Self {
            name: name.into(),
            kind: CalculationKind::Fixed,
            value: monthly_amount,
        }
    }

    pub fn percent_of_ctc(name: impl Into<String>, percentage: Decimal) -> Self {
        Self {
            name: name.into(),
            kind: CalculationKind::PercentOfCtc,
            value: percentage,
        }
    }

    pub fn percent_of_basic(name: impl Into<String>, percentage: Decimal) -> Self {
        Self {
            name: name.into(),
            kind: CalculationKind::PercentOfBasic,
            value: percentage,
        }
    }
}

/// A backend-supplied default component definition (statutory PF, ESI,
/// PT and similar), before it is merged into a template's lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub name: String,
    pub kind: CalculationKind,
    pub value: Decimal,
    pub earning: bool,
}

impl ComponentDefinition {
    pub fn to_component(&self) -> SalaryComponent {
        SalaryComponent {
            name: self.name.clone(),
            kind: self.kind,
            value: self.value,
        }
    }
}
