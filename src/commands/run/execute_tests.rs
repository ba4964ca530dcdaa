//! Execute tests for run command.

#[cfg(test)]
mod tests {
    use super::super::RunCmd;
    use crate::commands::{Execute, QueryArgs};
    use crate::db::Value;
    use crate::dialect::PostgresDialect;
    use crate::session::Session;
    use crate::test_utils::{create_temp_json_file, people_mapping, MockConnection};
    use rstest::{fixture, rstest};
    use tempfile::NamedTempFile;

    const NAMED_JO: &str = r#"{
        "entity": "Person",
        "conditions": [{"kind": "like", "expression": {"kind": "field", "name": "name"}, "value": "Jo", "match_mode": "start"}],
        "orders": [{"expression": {"kind": "field", "name": "id"}}]
    }"#;

    #[fixture]
    fn query_file() -> NamedTempFile {
        create_temp_json_file(NAMED_JO)
    }

    fn run_cmd(query: &NamedTempFile, count: bool) -> RunCmd {
        RunCmd {
            common: QueryArgs {
                query: query.path().to_path_buf(),
                dialect: None,
                limit: Some(2),
                offset: None,
                count,
            },
        }
    }

    fn session(db: MockConnection) -> Session {
        Session::new(Box::new(PostgresDialect::new()), people_mapping(), Box::new(db))
    }

    #[rstest]
    fn test_run_lists_rows(query_file: NamedTempFile) {
        let db = MockConnection::returning(
            &["id", "name", "age"],
            vec![
                vec![Value::Int(1), Value::from("Joan"), Value::Int(51)],
                vec![Value::Int(2), Value::from("Joe"), Value::Null],
            ],
        );
        let result = run_cmd(&query_file, false).execute(&session(db)).unwrap();
        assert_eq!(result.columns, vec!["id", "name", "age"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.count, None);
        assert_eq!(
            result.sql,
            "SELECT \"id\", \"name\", \"age\" FROM \"people\" WHERE \"name\" like :p_0 ORDER BY \"id\" ASC LIMIT 2"
        );
    }

    #[rstest]
    fn test_run_with_no_matches(query_file: NamedTempFile) {
        let session = session(MockConnection::returning(&["id"], vec![]));
        let result = run_cmd(&query_file, false).execute(&session).unwrap();
        assert!(result.rows.is_empty());
        assert!(result.columns.is_empty());
    }

    #[rstest]
    fn test_run_count(query_file: NamedTempFile) {
        let db = MockConnection::returning(&["count"], vec![vec![Value::Int(12)]]);
        let result = run_cmd(&query_file, true).execute(&session(db)).unwrap();
        assert_eq!(result.count, Some(12));
        assert!(result.sql.starts_with("SELECT COUNT(*) FROM (SELECT"));
    }

    #[rstest]
    fn test_run_surfaces_database_errors(query_file: NamedTempFile) {
        let db = MockConnection::failing("permission denied for table people");
        let err = run_cmd(&query_file, false).execute(&session(db)).unwrap_err();
        assert_eq!(err.to_string(), "permission denied for table people");
    }
}
