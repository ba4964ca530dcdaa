//! Execute tests for render command.

#[cfg(test)]
mod tests {
    use super::super::RenderCmd;
    use crate::commands::{Execute, QueryArgs};
    use crate::config::ConfigFile;
    use crate::db::Value;
    use crate::dialect::DialectKind;
    use crate::test_utils::{create_temp_json_file, PEOPLE_CONFIG};
    use rstest::{fixture, rstest};
    use tempfile::NamedTempFile;

    const ADULTS: &str = r#"{
        "entity": "Person",
        "conditions": [{
            "kind": "junction",
            "junction": "and",
            "members": [
                {"kind": "simple", "left": {"kind": "field", "name": "age"}, "op": ">", "right": {"kind": "value", "value": 18}},
                {"kind": "simple", "left": {"kind": "field", "name": "age"}, "op": "<", "right": {"kind": "value", "value": 65}}
            ]
        }],
        "limit": 5
    }"#;

    const SELECT_ADULTS: &str =
        "SELECT \"id\", \"name\", \"age\" FROM \"people\" WHERE ((\"age\" > @p_0) AND (\"age\" < @p_1))";

    #[fixture]
    fn config() -> ConfigFile {
        serde_json::from_str(PEOPLE_CONFIG).unwrap()
    }

    #[fixture]
    fn adults_file() -> NamedTempFile {
        create_temp_json_file(ADULTS)
    }

    fn render_cmd(query: &NamedTempFile) -> RenderCmd {
        RenderCmd {
            common: QueryArgs {
                query: query.path().to_path_buf(),
                dialect: None,
                limit: None,
                offset: None,
                count: false,
            },
            literal: false,
        }
    }

    fn execute(cmd: RenderCmd, config: &ConfigFile) -> super::super::RenderResult {
        let session = cmd.session(config);
        cmd.execute(&session).expect("Render should succeed")
    }

    #[rstest]
    fn test_render_uses_query_file_paging(config: ConfigFile, adults_file: NamedTempFile) {
        let result = execute(render_cmd(&adults_file), &config);
        assert_eq!(result.entity, "Person");
        assert_eq!(result.dialect, "generic");
        assert_eq!(result.sql, format!("{} LIMIT 5", SELECT_ADULTS));
        assert_eq!(result.params.get("p_0"), Some(&Value::Int(18)));
        assert_eq!(result.params.get("p_1"), Some(&Value::Int(65)));
    }

    #[rstest]
    fn test_command_line_paging_wins(config: ConfigFile, adults_file: NamedTempFile) {
        let mut cmd = render_cmd(&adults_file);
        cmd.common.limit = Some(10);
        cmd.common.offset = Some(30);
        let result = execute(cmd, &config);
        assert_eq!(result.sql, format!("{} LIMIT 10 OFFSET 30", SELECT_ADULTS));
    }

    #[rstest]
    fn test_dialect_override(config: ConfigFile, adults_file: NamedTempFile) {
        let mut cmd = render_cmd(&adults_file);
        cmd.common.dialect = Some(DialectKind::Mysql);
        let result = execute(cmd, &config);
        assert_eq!(result.dialect, "mysql");
        assert_eq!(
            result.sql,
            "SELECT `id`, `name`, `age` FROM `people` WHERE ((`age` > :p_0) AND (`age` < :p_1)) LIMIT 5"
        );
    }

    #[rstest]
    fn test_literal_render(config: ConfigFile, adults_file: NamedTempFile) {
        let mut cmd = render_cmd(&adults_file);
        cmd.literal = true;
        let result = execute(cmd, &config);
        assert_eq!(
            result.sql,
            "SELECT \"id\", \"name\", \"age\" FROM \"people\" WHERE ((\"age\" > 18) AND (\"age\" < 65)) LIMIT 5"
        );
        assert!(result.params.is_empty());
    }

    #[rstest]
    fn test_count_render(config: ConfigFile, adults_file: NamedTempFile) {
        let mut cmd = render_cmd(&adults_file);
        cmd.common.count = true;
        let result = execute(cmd, &config);
        assert!(result.count);
        assert_eq!(result.sql, format!("SELECT COUNT(*) FROM ({}) t", SELECT_ADULTS));
        assert_eq!(result.params.len(), 2);
    }

    #[rstest]
    fn test_unmapped_entity(config: ConfigFile) {
        let file = create_temp_json_file(r#"{"entity": "Invoice"}"#);
        let cmd = render_cmd(&file);
        let session = cmd.session(&config);
        let err = cmd.execute(&session).unwrap_err();
        assert_eq!(err.to_string(), "No table mapping for entity 'Invoice'");
    }

    #[rstest]
    fn test_missing_query_file(config: ConfigFile) {
        let mut cmd = render_cmd(&create_temp_json_file("{}"));
        cmd.common.query = "does/not/exist.json".into();
        let session = cmd.session(&config);
        let err = cmd.execute(&session).unwrap_err();
        assert!(err.to_string().contains("Failed to read query file"));
    }
}
