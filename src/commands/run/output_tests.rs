//! Output formatting tests for run command.

#[cfg(test)]
mod tests {
    use super::super::execute::RunResult;
    use crate::db::{Row, Value};
    use rstest::{fixture, rstest};

    const ROWS_TABLE: &str = "\
Person: 2 row(s)

id | name | age
1 | Joan | 51
2 | Joe | null";

    const EMPTY_TABLE: &str = "Person: 0 row(s)";

    const COUNT_TABLE: &str = "Person: 12 matching row(s)";

    fn columns() -> Vec<String> {
        vec!["id".to_string(), "name".to_string(), "age".to_string()]
    }

    #[fixture]
    fn rows_result() -> RunResult {
        RunResult {
            entity: "Person".to_string(),
            sql: "SELECT \"id\", \"name\", \"age\" FROM \"people\"".to_string(),
            columns: columns(),
            rows: vec![
                Row::new(columns(), vec![Value::Int(1), Value::from("Joan"), Value::Int(51)]),
                Row::new(columns(), vec![Value::Int(2), Value::from("Joe"), Value::Null]),
            ],
            count: None,
        }
    }

    #[fixture]
    fn empty_result() -> RunResult {
        RunResult {
            entity: "Person".to_string(),
            sql: "SELECT \"id\" FROM \"people\"".to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
            count: None,
        }
    }

    #[fixture]
    fn count_result() -> RunResult {
        RunResult {
            count: Some(12),
            ..empty_result()
        }
    }

    crate::output_table_test! {
        test_name: test_to_table_rows,
        fixture: rows_result,
        fixture_type: RunResult,
        expected: ROWS_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: RunResult,
        expected: EMPTY_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_count,
        fixture: count_result,
        fixture_type: RunResult,
        expected: COUNT_TABLE,
    }

    #[rstest]
    fn test_format_json_keeps_row_columns(rows_result: RunResult) {
        use crate::output::{OutputFormat, Outputable};
        let output = rows_result.format(OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["rows"][0]["name"], "Joan");
        assert_eq!(parsed["rows"][1]["age"], serde_json::Value::Null);
        assert!(parsed.get("count").is_none());
    }

    crate::output_json_test! {
        test_name: test_format_json_count,
        fixture: count_result,
        fixture_type: RunResult,
        assertions: {
            "count": 12,
            "entity": "Person",
        },
    }
}
