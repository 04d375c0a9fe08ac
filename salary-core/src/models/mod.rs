mod component;
mod location;
mod pt_slab;
mod settings;
mod template;

pub use component::{CalculationKind, ComponentDefinition, SalaryComponent};
pub use location::{Location, LocationAllowance};
pub use pt_slab::PtSlab;
pub use settings::PayrollSettings;
pub use template::{NewSalaryTemplate, SalaryTemplate};
