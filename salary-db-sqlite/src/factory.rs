use std::path::PathBuf;

use async_trait::async_trait;

use salary_core::db::repository::{PayrollRepository, RepositoryError};
use salary_core::db::{DbConfig, RepositoryFactory};

use crate::repository::SqliteRepository;

/// Resolve the seeds directory at runtime so it works in both development and
/// packaged distribution.
///
/// Resolution order:
/// 1. **`SALARY_DB_SQLITE_SEEDS_DIR`** — if set, use this path (override for
///    packagers or custom layouts).
/// 2. **`./seeds`** — if the directory exists in the current working directory.
/// 3. **Crate manifest dir** — `$CARGO_MANIFEST_DIR/seeds` as last resort
///    (dev/tests when run from the build tree).
fn seeds_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SALARY_DB_SQLITE_SEEDS_DIR") {
        return PathBuf::from(dir);
    }
    let cwd_seeds = PathBuf::from("./seeds");
    if cwd_seeds.is_dir() {
        return cwd_seeds;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seeds")
}

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`salary_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use salary_core::db::RepositoryRegistry;
/// use salary_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string`.
    ///
    /// Accepted connection-string values:
    /// * A bare file path — e.g. `"payroll.db"`.  The file is created if it
    ///   does not exist.
    /// * `":memory:"` — an ephemeral in-memory database (useful for tests).
    ///
    /// Migrations always run; seed SQL files are loaded from a directory
    /// resolved at runtime (see [`seeds_dir`]) and skipped when that
    /// directory does not exist.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn PayrollRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let seeds = seeds_dir();
        if seeds.is_dir() {
            repo.run_seeds(&seeds)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;
        }
        Ok(Box::new(repo))
    }
}
