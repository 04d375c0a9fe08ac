use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use salary_core::RepositoryError;
use sqlx::{Row, TypeInfo, ValueRef};

/// Get a decimal value from a row, handling both INTEGER and REAL SQLite types.
pub fn get_decimal(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Decimal, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    let type_info = value_ref.type_info();
    let type_name = type_info.name();

    match type_name {
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to get INTEGER from '{}': {}",
                    column, e
                ))
            })?;
            Ok(Decimal::from(val))
        }
        "REAL" => {
            let val: f64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get REAL from '{}': {}", column, e))
            })?;
            Decimal::try_from(val).map_err(|e| {
                RepositoryError::Database(format!("Failed to convert {} to Decimal: {}", val, e))
            })
        }
        "NULL" => Ok(Decimal::ZERO),
        _ => Err(RepositoryError::Database(format!(
            "Unexpected type '{}' for column '{}'",
            type_name, column
        ))),
    }
}

/// Get an optional decimal value from a row, returning None for NULL values.
pub fn get_optional_decimal(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Option<Decimal>, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    if value_ref.is_null() {
        return Ok(None);
    }

    get_decimal(row, column).map(Some)
}

/// Convert a Decimal to f64 for SQLite storage.
pub fn decimal_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_test_db() -> sqlx::sqlite::SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        sqlx::query(
            "CREATE TABLE amounts (
                id INTEGER PRIMARY KEY,
                int_value INTEGER,
                real_value REAL,
                null_value REAL,
                text_value TEXT
            )",
        )
        .execute(&pool)
        .await
        .expect("Failed to create test table");
        pool
    }

    async fn fetch_row(
        pool: &sqlx::sqlite::SqlitePool,
        insert: &str,
        select: &str,
    ) -> sqlx::sqlite::SqliteRow {
        sqlx::query(insert)
            .execute(pool)
            .await
            .expect("Failed to insert test data");
        sqlx::query(select)
            .fetch_one(pool)
            .await
            .expect("Failed to fetch row")
    }

    #[tokio::test]
    async fn get_decimal_reads_integer_columns() {
        let pool = setup_test_db().await;
        let row = fetch_row(
            &pool,
            "INSERT INTO amounts (id, int_value) VALUES (1, 20000)",
            "SELECT int_value FROM amounts WHERE id = 1",
        )
        .await;

        assert_eq!(get_decimal(&row, "int_value"), Ok(dec!(20000)));
    }

    #[tokio::test]
    async fn get_decimal_reads_real_columns() {
        let pool = setup_test_db().await;
        let row = fetch_row(
            &pool,
            "INSERT INTO amounts (id, real_value) VALUES (1, 1833.33)",
            "SELECT real_value FROM amounts WHERE id = 1",
        )
        .await;

        assert_eq!(get_decimal(&row, "real_value"), Ok(dec!(1833.33)));
    }

    #[tokio::test]
    async fn get_decimal_reads_negative_real() {
        let pool = setup_test_db().await;
        let row = fetch_row(
            &pool,
            "INSERT INTO amounts (id, real_value) VALUES (1, -456.78)",
            "SELECT real_value FROM amounts WHERE id = 1",
        )
        .await;

        assert_eq!(get_decimal(&row, "real_value"), Ok(dec!(-456.78)));
    }

    #[tokio::test]
    async fn get_decimal_null_returns_zero() {
        let pool = setup_test_db().await;
        let row = fetch_row(
            &pool,
            "INSERT INTO amounts (id, null_value) VALUES (1, NULL)",
            "SELECT null_value FROM amounts WHERE id = 1",
        )
        .await;

        assert_eq!(get_decimal(&row, "null_value"), Ok(Decimal::ZERO));
    }

    #[tokio::test]
    async fn get_decimal_missing_column_is_database_error() {
        let pool = setup_test_db().await;
        let row = fetch_row(
            &pool,
            "INSERT INTO amounts (id) VALUES (1)",
            "SELECT id FROM amounts WHERE id = 1",
        )
        .await;

        let result = get_decimal(&row, "nonexistent_column");

        assert!(
            matches!(result, Err(RepositoryError::Database(msg)) if msg.starts_with("Column 'nonexistent_column' not found:"))
        );
    }

    #[tokio::test]
    async fn get_decimal_unexpected_type_is_database_error() {
        let pool = setup_test_db().await;
        let row = fetch_row(
            &pool,
            "INSERT INTO amounts (id, text_value) VALUES (1, 'not a number')",
            "SELECT text_value FROM amounts WHERE id = 1",
        )
        .await;

        assert_eq!(
            get_decimal(&row, "text_value"),
            Err(RepositoryError::Database(
                "Unexpected type 'TEXT' for column 'text_value'".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn get_optional_decimal_null_returns_none() {
        let pool = setup_test_db().await;
        let row = fetch_row(
            &pool,
            "INSERT INTO amounts (id, null_value) VALUES (1, NULL)",
            "SELECT null_value FROM amounts WHERE id = 1",
        )
        .await;

        assert_eq!(get_optional_decimal(&row, "null_value"), Ok(None));
    }

    #[tokio::test]
    async fn get_optional_decimal_present_returns_some() {
        let pool = setup_test_db().await;
        let row = fetch_row(
            &pool,
            "INSERT INTO amounts (id, real_value) VALUES (1, 999.99)",
            "SELECT real_value FROM amounts WHERE id = 1",
        )
        .await;

        assert_eq!(
            get_optional_decimal(&row, "real_value"),
            Ok(Some(dec!(999.99)))
        );
    }

    #[test]
    fn decimal_to_f64_round_trips_common_amounts() {
        assert_eq!(decimal_to_f64(dec!(123.45)), 123.45);
        assert_eq!(decimal_to_f64(dec!(-789.01)), -789.01);
        assert_eq!(decimal_to_f64(Decimal::ZERO), 0.0);
    }
}
