use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use salary_core::{
    CalculationKind, ComponentDefinition, Location, LocationAllowance, NewSalaryTemplate,
    PayrollRepository, PayrollSettings, PtSlab, RepositoryError, SalaryComponent, SalaryTemplate,
    TemplateCalculator,
};
use sqlx::{Row, sqlite::SqlitePool};
use tracing::debug;

use crate::decimal::{decimal_to_f64, get_decimal, get_optional_decimal};

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<()> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .with_context(|| format!("Failed to read seeds directory '{}'", seeds_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            debug!("executing seed file {}", path.display());
            let sql = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;

            sqlx::raw_sql(&sql)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to execute seed file '{}'", path.display()))?;
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn load_template_components(
        &self,
        template_id: i64,
    ) -> Result<(Vec<SalaryComponent>, Vec<SalaryComponent>), RepositoryError> {
        let rows = sqlx::query(
            "SELECT component_name, calculation_type, value, earning
             FROM template_components
             WHERE template_id = ?
             ORDER BY position",
        )
        .bind(template_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let mut earnings = Vec::new();
        let mut deductions = Vec::new();

        for row in &rows {
            let component = SalaryComponent {
                name: row
                    .try_get("component_name")
                    .map_err(|e| RepositoryError::Database(e.to_string()))?,
                kind: kind_from_row(row)?,
                value: get_decimal(row, "value")?,
            };
            let earning: bool = row
                .try_get("earning")
                .map_err(|e| RepositoryError::Database(e.to_string()))?;
            if earning {
                earnings.push(component);
            } else {
                deductions.push(component);
            }
        }

        Ok((earnings, deductions))
    }
}

fn kind_from_code(code: &str) -> Result<CalculationKind, RepositoryError> {
    CalculationKind::parse(code).ok_or_else(|| {
        RepositoryError::Database(format!("Unknown calculation type '{}'", code))
    })
}

fn kind_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<CalculationKind, RepositoryError> {
    let code: String = row
        .try_get("calculation_type")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
    kind_from_code(&code)
}

fn row_to_template_header(
    row: &sqlx::sqlite::SqliteRow
) -> Result<SalaryTemplate, RepositoryError> {
    Ok(SalaryTemplate {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        template_name: row
            .try_get("template_name")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        description: row
            .try_get("description")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        annual_ctc: get_decimal(row, "annual_ctc")?,
        earnings: Vec::new(),
        deductions: Vec::new(),
        per_day_allowance: get_decimal(row, "per_day_allowance")?,
        pg_rent: get_decimal(row, "pg_rent")?,
    })
}

/// Inserts a template's component rows inside an open transaction,
/// earnings first so positions reproduce the wire ordering.
async fn insert_components(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    template_id: i64,
    annual_ctc: rust_decimal::Decimal,
    earnings: &[SalaryComponent],
    deductions: &[SalaryComponent],
) -> Result<(), RepositoryError> {
    let calc = TemplateCalculator::new();
    let mut position: i64 = 0;

    let flagged = earnings
        .iter()
        .map(|c| (c, true))
        .chain(deductions.iter().map(|c| (c, false)));

    for (component, earning) in flagged {
        let monthly = calc.monthly_amount(component, annual_ctc);
        let annual = calc.annual_amount(component, annual_ctc);

        sqlx::query(
            "INSERT INTO template_components
             (template_id, component_name, calculation_type, value,
              monthly_amount, annual_amount, earning, position)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(template_id)
        .bind(&component.name)
        .bind(component.kind.as_str())
        .bind(decimal_to_f64(component.value))
        .bind(decimal_to_f64(monthly))
        .bind(decimal_to_f64(annual))
        .bind(earning)
        .bind(position)
        .execute(&mut **tx)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        position += 1;
    }

    Ok(())
}

#[async_trait]
impl PayrollRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<PayrollSettings, RepositoryError> {
        let row = sqlx::query(
            "SELECT annual_ctc, pf_rate, esi_rate FROM payroll_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        let component_rows = sqlx::query(
            "SELECT name, calculation_type, value, earning
             FROM settings_components
             ORDER BY position, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let mut earnings = Vec::new();
        let mut deductions = Vec::new();
        for crow in &component_rows {
            let component = SalaryComponent {
                name: crow
                    .try_get("name")
                    .map_err(|e| RepositoryError::Database(e.to_string()))?,
                kind: kind_from_row(crow)?,
                value: get_decimal(crow, "value")?,
            };
            let earning: bool = crow
                .try_get("earning")
                .map_err(|e| RepositoryError::Database(e.to_string()))?;
            if earning {
                earnings.push(component);
            } else {
                deductions.push(component);
            }
        }

        Ok(PayrollSettings {
            annual_ctc: get_decimal(&row, "annual_ctc")?,
            pf_rate: get_decimal(&row, "pf_rate")?,
            esi_rate: get_decimal(&row, "esi_rate")?,
            earnings,
            deductions,
        })
    }

    async fn list_default_components(
        &self,
    ) -> Result<Vec<ComponentDefinition>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT name, calculation_type, value, earning FROM default_components ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                Ok(ComponentDefinition {
                    name: row
                        .try_get("name")
                        .map_err(|e| RepositoryError::Database(e.to_string()))?,
                    kind: kind_from_row(row)?,
                    value: get_decimal(row, "value")?,
                    earning: row
                        .try_get("earning")
                        .map_err(|e| RepositoryError::Database(e.to_string()))?,
                })
            })
            .collect()
    }

    async fn insert_default_component(
        &self,
        definition: &ComponentDefinition,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO default_components (name, calculation_type, value, earning)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&definition.name)
        .bind(definition.kind.as_str())
        .bind(decimal_to_f64(definition.value))
        .bind(definition.earning)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn delete_default_components(
        &self,
        earning: bool,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM default_components WHERE earning = ?")
            .bind(earning)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn get_active_pt_slab(&self) -> Result<PtSlab, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, min_salary, max_salary, amount, active
             FROM pt_slabs WHERE active = 1
             ORDER BY min_salary DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(PtSlab {
            id: row
                .try_get("id")
                .map_err(|e| RepositoryError::Database(e.to_string()))?,
            min_salary: get_decimal(&row, "min_salary")?,
            max_salary: get_optional_decimal(&row, "max_salary")?,
            amount: get_decimal(&row, "amount")?,
            active: row
                .try_get("active")
                .map_err(|e| RepositoryError::Database(e.to_string()))?,
        })
    }

    async fn list_locations(&self) -> Result<Vec<Location>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name FROM locations ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                Ok(Location {
                    id: row
                        .try_get("id")
                        .map_err(|e| RepositoryError::Database(e.to_string()))?,
                    name: row
                        .try_get("name")
                        .map_err(|e| RepositoryError::Database(e.to_string()))?,
                })
            })
            .collect()
    }

    async fn get_location_allowance(
        &self,
        location_id: i64,
    ) -> Result<LocationAllowance, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, per_day_allowance, pg_rent FROM locations WHERE id = ?",
        )
        .bind(location_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(LocationAllowance {
            location_id: row
                .try_get("id")
                .map_err(|e| RepositoryError::Database(e.to_string()))?,
            per_day_allowance: get_decimal(&row, "per_day_allowance")?,
            pg_rent: get_decimal(&row, "pg_rent")?,
        })
    }

    async fn list_templates(&self) -> Result<Vec<SalaryTemplate>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, template_name, description, annual_ctc, per_day_allowance, pg_rent
             FROM salary_templates ORDER BY template_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let mut templates = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut template = row_to_template_header(row)?;
            let (earnings, deductions) =
                self.load_template_components(template.id).await?;
            template.earnings = earnings;
            template.deductions = deductions;
            templates.push(template);
        }

        Ok(templates)
    }

    async fn get_template(&self, id: i64) -> Result<SalaryTemplate, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, template_name, description, annual_ctc, per_day_allowance, pg_rent
             FROM salary_templates WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        let mut template = row_to_template_header(&row)?;
        let (earnings, deductions) = self.load_template_components(id).await?;
        template.earnings = earnings;
        template.deductions = deductions;
        Ok(template)
    }

    async fn save_template(
        &self,
        template: NewSalaryTemplate,
    ) -> Result<SalaryTemplate, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO salary_templates
             (template_name, description, annual_ctc, per_day_allowance, pg_rent)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&template.template_name)
        .bind(&template.description)
        .bind(decimal_to_f64(template.annual_ctc))
        .bind(decimal_to_f64(template.per_day_allowance))
        .bind(decimal_to_f64(template.pg_rent))
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();

        insert_components(
            &mut tx,
            id,
            template.annual_ctc,
            &template.earnings,
            &template.deductions,
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(template.into_template(id))
    }

    async fn update_template(
        &self,
        template: &SalaryTemplate,
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE salary_templates
             SET template_name = ?, description = ?, annual_ctc = ?,
                 per_day_allowance = ?, pg_rent = ?
             WHERE id = ?",
        )
        .bind(&template.template_name)
        .bind(&template.description)
        .bind(decimal_to_f64(template.annual_ctc))
        .bind(decimal_to_f64(template.per_day_allowance))
        .bind(decimal_to_f64(template.pg_rent))
        .bind(template.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query("DELETE FROM template_components WHERE template_id = ?")
            .bind(template.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        insert_components(
            &mut tx,
            template.id,
            template.annual_ctc,
            &template.earnings,
            &template.deductions,
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))
    }

    async fn delete_template(&self, id: i64) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        sqlx::query("DELETE FROM template_components WHERE template_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let result = sqlx::query("DELETE FROM salary_templates WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))
    }
}
