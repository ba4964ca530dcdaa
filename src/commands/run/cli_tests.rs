//! CLI parsing tests for run command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::output::OutputFormat;
    use clap::Parser;
    use rstest::rstest;
    use std::path::PathBuf;

    crate::cli_required_arg_test! {
        command: "run",
        test_name: test_requires_query,
        required_arg: "--query",
    }

    crate::cli_defaults_test! {
        command: "run",
        variant: Run,
        required_args: ["--query", "people.json"],
        defaults: {
            common.query: PathBuf::from("people.json"),
            common.limit: None,
            common.count: false,
        },
    }

    crate::cli_option_test_with_required! {
        command: "run",
        variant: Run,
        required_args: ["--query", "people.json"],
        test_name: test_with_offset,
        args: ["--offset", "40"],
        field: common.offset,
        expected: Some(40),
    }

    crate::cli_error_test! {
        command: "run",
        test_name: test_literal_not_accepted,
        args: ["--query", "people.json", "--literal"],
    }

    #[rstest]
    fn test_global_format_after_subcommand() {
        let args = Args::try_parse_from(["criteria", "run", "-q", "people.json", "--format", "json"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[rstest]
    fn test_global_config_path() {
        let args = Args::try_parse_from(["criteria", "--config", "conf/app.json", "run", "-q", "people.json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("conf/app.json")));
    }
}
