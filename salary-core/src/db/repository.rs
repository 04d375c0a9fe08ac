use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    ComponentDefinition, Location, LocationAllowance, NewSalaryTemplate, PayrollSettings, PtSlab,
    SalaryTemplate,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Backend-agnostic access to payroll reference data and templates.
///
/// Callers own the failure policy: there are no retries here, and a fetch
/// that fails should degrade to an empty/default state for that source.
/// Template saves are all-or-nothing; implementations must not persist a
/// partial component list.
#[async_trait]
pub trait PayrollRepository: Send + Sync {
    // Settings
    async fn get_settings(&self) -> Result<PayrollSettings, RepositoryError>;

    // Default component definitions
    async fn list_default_components(
        &self,
    ) -> Result<Vec<ComponentDefinition>, RepositoryError>;
    async fn insert_default_component(
        &self,
        definition: &ComponentDefinition,
    ) -> Result<(), RepositoryError>;
    async fn delete_default_components(
        &self,
        earning: bool,
    ) -> Result<(), RepositoryError>;

    // Professional tax
    async fn get_active_pt_slab(&self) -> Result<PtSlab, RepositoryError>;

    // Locations and allowances
    async fn list_locations(&self) -> Result<Vec<Location>, RepositoryError>;
    async fn get_location_allowance(
        &self,
        location_id: i64,
    ) -> Result<LocationAllowance, RepositoryError>;

    // Templates
    async fn list_templates(&self) -> Result<Vec<SalaryTemplate>, RepositoryError>;
    async fn get_template(&self, id: i64) -> Result<SalaryTemplate, RepositoryError>;
    async fn save_template(
        &self,
        template: NewSalaryTemplate,
    ) -> Result<SalaryTemplate, RepositoryError>;
    async fn update_template(
        &self,
        template: &SalaryTemplate,
    ) -> Result<(), RepositoryError>;
    async fn delete_template(&self, id: i64) -> Result<(), RepositoryError>;
}
