//! Query execution utilities.
//!
//! Thin helpers over [`Connection::query`] that give the criteria layer its
//! three execution paths: untyped rows, rows deserialized into a result
//! shape, and a single integer column for counts.

use serde::de::DeserializeOwned;
use tracing::debug;

use super::backend::{Connection, Params, Row};
use super::DbError;
use crate::mapping::EntityTarget;

/// Run a query and pair each row with its column names.
pub fn run_query(
    db: &dyn Connection,
    target: Option<&EntityTarget>,
    sql: &str,
    params: &Params,
) -> Result<Vec<Row>, DbError> {
    debug!(backend = db.backend_name(), sql, params = params.len(), "Executing query");
    let result = db.query(target, sql, params).map_err(DbError::Execution)?;
    Ok(result.into_rows())
}

/// Run a query and deserialize every row into `T`.
///
/// Rows are converted to JSON objects keyed by column name, so `T` is
/// matched by field name rather than by position.
pub fn query_as<T: DeserializeOwned>(
    db: &dyn Connection,
    target: Option<&EntityTarget>,
    sql: &str,
    params: &Params,
) -> Result<Vec<T>, DbError> {
    run_query(db, target, sql, params)?
        .iter()
        .map(|row| serde_json::from_value(row.to_json()).map_err(DbError::Deserialize))
        .collect()
}

/// Run a query whose rows each hold exactly one integer column.
pub fn query_scalar(db: &dyn Connection, sql: &str, params: &Params) -> Result<Vec<i64>, DbError> {
    run_query(db, None, sql, params)?
        .iter()
        .map(|row| {
            if row.len() != 1 {
                return Err(DbError::UnexpectedColumns { count: row.len() });
            }
            let value = &row.values()[0];
            value.as_i64().ok_or_else(|| DbError::InvalidScalar {
                type_name: value.type_name(),
            })
        })
        .collect()
}
