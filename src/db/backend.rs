//! Connection trait for abstracting the execution layer.
//!
//! The criteria compiler never talks to a database directly. It hands the
//! compiled SQL and its parameter map to a `Connection`, which owns
//! connectivity, blocking behavior and error reporting.

use std::collections::BTreeMap;
use std::error::Error;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::value::Value;
use crate::mapping::EntityTarget;

/// Error type produced by connection implementations.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Type alias for query parameters, keyed by parameter name (without prefix).
pub type Params = BTreeMap<String, Value>;

/// Result of a query execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// Pair every row with the result headers.
    pub fn into_rows(self) -> Vec<Row> {
        let headers = self.headers;
        self.rows
            .into_iter()
            .map(|values| Row {
                columns: headers.clone(),
                values,
            })
            .collect()
    }
}

/// A single result row with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Look up a column value by name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
    }

    /// Look up a column value by position.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert to a JSON object keyed by column name.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .columns
            .iter()
            .zip(self.values.iter())
            .map(|(c, v)| (c.clone(), v.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.columns.iter().zip(self.values.iter()) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Trait for execution backends that run compiled SQL.
///
/// `target` identifies the entity a result maps to, either by Rust type or by
/// entity name. It is `None` for scalar queries such as counts.
pub trait Connection: Send + Sync {
    /// Execute a query with named parameters, returning raw rows.
    fn query(
        &self,
        target: Option<&EntityTarget>,
        sql: &str,
        params: &Params,
    ) -> Result<QueryResult, BoxError>;

    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// Connection used when no database is configured.
///
/// Rendering works normally; every execution attempt fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct Disconnected;

impl Connection for Disconnected {
    fn query(
        &self,
        _target: Option<&EntityTarget>,
        _sql: &str,
        _params: &Params,
    ) -> Result<QueryResult, BoxError> {
        Err("no database connection configured".into())
    }

    fn backend_name(&self) -> &'static str {
        "Disconnected"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_result() -> QueryResult {
        QueryResult {
            headers: vec!["id".to_string(), "name".to_string()],
            rows: vec![
                vec![Value::Int(1), Value::Str("Ann".into())],
                vec![Value::Int(2), Value::Null],
            ],
        }
    }

    #[rstest]
    fn test_into_rows_pairs_headers() {
        let rows = sample_result().into_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some(&Value::Str("Ann".into())));
        assert_eq!(rows[1].get("name"), Some(&Value::Null));
        assert_eq!(rows[1].get("missing"), None);
        assert_eq!(rows[0].get_index(0), Some(&Value::Int(1)));
    }

    #[rstest]
    fn test_row_serializes_as_ordered_map() {
        let rows = sample_result().into_rows();
        let json = serde_json::to_string(&rows[0]).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"Ann"}"#);
    }

    #[rstest]
    fn test_row_to_json() {
        let rows = sample_result().into_rows();
        assert_eq!(rows[1].to_json(), serde_json::json!({"id": 2, "name": null}));
    }

    #[rstest]
    fn test_disconnected_fails() {
        let result = Disconnected.query(None, "SELECT 1", &Params::new());
        assert!(result.unwrap_err().to_string().contains("no database"));
    }

    #[rstest]
    fn test_trait_is_object_safe() {
        fn accepts_connection(_db: &dyn Connection) {}
        accepts_connection(&Disconnected);
    }
}
