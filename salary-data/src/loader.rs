use std::io::Read;

use rust_decimal::Decimal;
use salary_core::{CalculationKind, ComponentDefinition, PayrollRepository, RepositoryError};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading default component data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComponentLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown calculation type '{kind}' for component '{component}'")]
    UnknownCalculationType { component: String, kind: String },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for ComponentLoaderError {
    fn from(err: csv::Error) -> Self {
        ComponentLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the default components CSV file.
///
/// The CSV columns:
/// - `name`: The component name (e.g., "Provident Fund")
/// - `calculation_type`: FIXED, PERCENTAGE, or BASICPERCENTAGE
/// - `value`: The amount (for FIXED) or percentage figure
/// - `earning`: `true` for earnings, `false` for deductions
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ComponentRecord {
    pub name: String,
    pub calculation_type: String,
    pub value: Decimal,
    pub earning: bool,
}

impl ComponentRecord {
    fn to_definition(&self) -> Result<ComponentDefinition, ComponentLoaderError> {
        let kind = CalculationKind::parse(&self.calculation_type).ok_or_else(|| {
            ComponentLoaderError::UnknownCalculationType {
                component: self.name.clone(),
                kind: self.calculation_type.clone(),
            }
        })?;
        Ok(ComponentDefinition {
            name: self.name.clone(),
            kind,
            value: self.value,
            earning: self.earning,
        })
    }
}

/// Loader for default salary component data from CSV files.
///
/// Reads CSV data and inserts it into the database via the
/// [`PayrollRepository`] trait, so it works with any backend.
pub struct ComponentLoader;

impl ComponentLoader {
    /// Parse component records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file
    /// or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ComponentRecord>, ComponentLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ComponentRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Load component records into the database.
    ///
    /// For each side (earnings, deductions) that appears in the records,
    /// existing default components on that side are deleted before the new
    /// ones are inserted, so loading the same file twice produces the same
    /// result. A side absent from the file is left untouched.
    ///
    /// All records are validated before anything is deleted; a single
    /// unknown calculation type fails the whole load.
    pub async fn load<R: PayrollRepository + ?Sized>(
        repo: &R,
        records: &[ComponentRecord],
    ) -> Result<usize, ComponentLoaderError> {
        let definitions = records
            .iter()
            .map(|r| r.to_definition())
            .collect::<Result<Vec<_>, _>>()?;

        for earning in [true, false] {
            if definitions.iter().any(|d| d.earning == earning) {
                repo.delete_default_components(earning).await?;
            }
        }

        for definition in &definitions {
            repo.insert_default_component(definition).await?;
        }

        Ok(definitions.len())
    }
}
