//! SQLite backend for the salary template engine.
//!
//! Implements [`salary_core::PayrollRepository`] over a `sqlx` pool, with
//! embedded migrations and optional SQL seed files for reference data.

mod decimal;
mod factory;
mod repository;

pub use factory::SqliteRepositoryFactory;
pub use repository::SqliteRepository;
