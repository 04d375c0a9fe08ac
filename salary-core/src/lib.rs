//! Core domain model, calculations, and backend seam for the salary
//! template engine.

pub mod calculations;
pub mod db;
pub mod models;
pub mod wire;

pub use calculations::{TemplateBreakdown, TemplateCalculator};
pub use db::{DbConfig, PayrollRepository, RepositoryError, RepositoryFactory, RepositoryRegistry};
pub use models::*;
pub use wire::{WireComponent, WireError, WireTemplate};
