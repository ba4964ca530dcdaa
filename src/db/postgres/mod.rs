//! PostgreSQL connection implementation.
//!
//! Runs compiled criteria SQL through the synchronous `postgres` client.
//! The compiler emits named placeholders; this module rewrites them to the
//! positional `$n` form the wire protocol expects before executing.

mod conversion;

use std::sync::Mutex;

use ::postgres::types::ToSql;
use ::postgres::{Client, NoTls};
use tracing::debug;

use super::backend::{BoxError, Connection, Params, QueryResult};
use super::DbError;
use crate::mapping::EntityTarget;

pub use conversion::rewrite_placeholders;
use conversion::row_values;

/// Placeholder prefix the PostgreSQL dialect renders, see `PostgresDialect`.
pub const PARAM_PREFIX: &str = ":";

/// PostgreSQL connection.
///
/// The client needs `&mut` access to run a query, so it is kept behind a
/// mutex and used serially.
pub struct PostgresConnection {
    client: Mutex<Client>,
    prefix: String,
}

impl PostgresConnection {
    /// Connect using a PostgreSQL connection string.
    ///
    /// # Example
    /// ```no_run
    /// # use criteria::db::PostgresConnection;
    /// let conn = PostgresConnection::connect("host=localhost user=postgres dbname=app")?;
    /// # Ok::<(), criteria::db::DbError>(())
    /// ```
    pub fn connect(connection_string: &str) -> Result<Self, DbError> {
        let client = Client::connect(connection_string, NoTls).map_err(|e| DbError::ConnectFailed {
            backend: "PostgreSQL",
            message: e.to_string(),
        })?;
        Ok(Self::from_client(client))
    }

    /// Wrap an already connected client.
    pub fn from_client(client: Client) -> Self {
        Self {
            client: Mutex::new(client),
            prefix: PARAM_PREFIX.to_string(),
        }
    }

    /// Use a different placeholder prefix, for SQL rendered by another dialect.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl Connection for PostgresConnection {
    fn query(
        &self,
        target: Option<&EntityTarget>,
        sql: &str,
        params: &Params,
    ) -> Result<QueryResult, BoxError> {
        let (positional_sql, order) = rewrite_placeholders(sql, &self.prefix, params);
        let bound: Vec<&(dyn ToSql + Sync)> = order
            .iter()
            .filter_map(|name| params.get(name))
            .map(|v| v as &(dyn ToSql + Sync))
            .collect();

        debug!(
            entity = target.map(|t| t.entity_name()).unwrap_or("-"),
            sql = positional_sql.as_str(),
            bound = bound.len(),
            "Running PostgreSQL query"
        );

        let mut client = self
            .client
            .lock()
            .map_err(|e| format!("Failed to acquire connection lock: {}", e))?;

        let statement = client.prepare(&positional_sql)?;
        let headers = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        let rows = client
            .query(&statement, &bound)?
            .iter()
            .map(row_values)
            .collect();

        Ok(QueryResult { headers, rows })
    }

    fn backend_name(&self) -> &'static str {
        "PostgreSQL"
    }
}
