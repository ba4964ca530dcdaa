//! Shared test utilities for unit and command tests.
//!
//! Provides a recording mock connection, a sample mapping and the helpers
//! used by the command execute tests.

use std::io::Write;
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::db::{BoxError, Connection, Params, QueryResult, Value};
use crate::mapping::{Entity, EntityTarget, Mapping, Table};

/// Connection that returns a canned result and records every query it runs.
pub struct MockConnection {
    result: Result<QueryResult, String>,
    queries: Mutex<Vec<(String, Params)>>,
}

impl MockConnection {
    /// Answer every query with `rows` under `headers`.
    pub fn returning(headers: &[&str], rows: Vec<Vec<Value>>) -> Self {
        Self {
            result: Ok(QueryResult {
                headers: headers.iter().map(|h| h.to_string()).collect(),
                rows,
            }),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Fail every query with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// SQL and parameters of the most recent query.
    pub fn last_query(&self) -> Option<(String, Params)> {
        self.queries.lock().unwrap().last().cloned()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

impl Connection for MockConnection {
    fn query(
        &self,
        _target: Option<&EntityTarget>,
        sql: &str,
        params: &Params,
    ) -> Result<QueryResult, BoxError> {
        self.queries.lock().unwrap().push((sql.to_string(), params.clone()));
        match &self.result {
            Ok(result) => Ok(result.clone()),
            Err(message) => Err(message.clone().into()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "Mock"
    }
}

/// Result shape for the sample `Person` entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
}

impl Entity for Person {
    const ENTITY: &'static str = "Person";
}

/// `Person` → `people (id, name, age)`.
pub fn people_mapping() -> Mapping {
    Mapping::new().add_entity::<Person>(Table::new("people").column("id").column("name").column("age"))
}

/// Config file content matching [`people_mapping`].
pub const PEOPLE_CONFIG: &str = r#"{
    "dialect": "generic",
    "tables": {
        "Person": {"table": "people", "columns": ["id", "name", "age"]}
    }
}"#;

/// Serializes tests that touch process environment variables.
pub fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Create a temporary file containing the given content.
///
/// Used to create config and query JSON files for command tests.
pub fn create_temp_json_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}
