//! SQL dialect contract for multi-database support.
//!
//! A dialect answers the questions the criteria compiler cannot answer on its
//! own: how identifiers are quoted, how placeholders are spelled, which
//! functions exist and how a finished select is paged. It never sees the
//! filter or projection tree.
//!
//! Two behaviors differ between engines in ways the compiler has to know
//! about, and they are exposed as capability flags rather than dialect
//! identity checks:
//! - `supports_ilike`: the engine has a native case-insensitive LIKE
//! - `parenthesize_not_operand`: NOT must wrap its operand in parentheses

mod function;
mod generic;
mod mysql;
mod postgres;
mod sqlite;
mod sqlserver;

pub use function::{FunctionRegistry, NoArgFunction, SqlFunction, StandardFunction, VarArgsFunction};
pub use generic::GenericDialect;
pub use mysql::MySqlDialect;
pub use self::postgres::PostgresDialect;
pub use sqlite::SqliteDialect;
pub use sqlserver::SqlServerDialect;

use std::fmt::Debug;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::db::{quote_identifier, quote_literal};

/// SQL dialect trait for generating database-specific SQL.
pub trait Dialect: Debug + Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    fn open_quote(&self) -> char {
        '"'
    }

    fn close_quote(&self) -> char {
        '"'
    }

    /// Quote an identifier. Well-formed quoted identifiers pass through.
    fn quote(&self, identifier: &str) -> String {
        let (open, close) = (self.open_quote(), self.close_quote());
        if is_quoted(identifier, open, close) {
            return identifier.to_string();
        }
        quote_identifier(identifier, open, close)
    }

    /// Render a string as a SQL literal.
    fn quote_literal(&self, value: &str) -> String {
        quote_literal(value)
    }

    /// Prefix prepended to a parameter name to form its placeholder.
    fn param_prefix(&self) -> &str {
        "@"
    }

    /// Function used to emulate case-insensitive LIKE.
    fn lowercase_function(&self) -> &str {
        "lower"
    }

    fn functions(&self) -> &FunctionRegistry;

    fn find_function(&self, name: &str) -> Option<&dyn SqlFunction> {
        self.functions().get(name)
    }

    /// Produce the paged form of `sql`.
    ///
    /// `order_by` is the complete `ORDER BY ...` clause when the query has
    /// orders. The default appends `LIMIT n [OFFSET m]`.
    fn get_paging(&self, sql: &str, order_by: Option<&str>, limit: u64, offset: u64) -> String {
        let mut paged = with_order(sql, order_by);
        paged.push_str(&format!(" LIMIT {}", limit));
        if offset > 0 {
            paged.push_str(&format!(" OFFSET {}", offset));
        }
        paged
    }

    fn supports_ilike(&self) -> bool {
        false
    }

    fn parenthesize_not_operand(&self) -> bool {
        false
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }
}

/// True when `identifier` is wrapped in `open`/`close` and every closing
/// delimiter inside it is doubled.
fn is_quoted(identifier: &str, open: char, close: char) -> bool {
    let Some(inner) = identifier
        .strip_prefix(open)
        .and_then(|rest| rest.strip_suffix(close))
    else {
        return false;
    };
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == close && chars.next() != Some(close) {
            return false;
        }
    }
    true
}

/// `sql` followed by the order clause, if any.
pub(crate) fn with_order(sql: &str, order_by: Option<&str>) -> String {
    match order_by {
        Some(order) => format!("{} {}", sql, order),
        None => sql.to_string(),
    }
}

/// Built-in dialects, selectable by name from config or the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// ANSI-style SQL with LIMIT/OFFSET paging
    #[default]
    Generic,
    /// PostgreSQL
    Postgres,
    /// MySQL / MariaDB
    Mysql,
    /// SQLite
    Sqlite,
    /// Microsoft SQL Server
    Sqlserver,
}

impl DialectKind {
    pub fn create(self) -> Box<dyn Dialect> {
        match self {
            Self::Generic => Box::new(GenericDialect::new()),
            Self::Postgres => Box::new(PostgresDialect::new()),
            Self::Mysql => Box::new(MySqlDialect::new()),
            Self::Sqlite => Box::new(SqliteDialect::new()),
            Self::Sqlserver => Box::new(SqlServerDialect::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DialectKind::Generic, "generic")]
    #[case(DialectKind::Postgres, "postgres")]
    #[case(DialectKind::Mysql, "mysql")]
    #[case(DialectKind::Sqlite, "sqlite")]
    #[case(DialectKind::Sqlserver, "sqlserver")]
    fn test_kind_creates_named_dialect(#[case] kind: DialectKind, #[case] name: &str) {
        assert_eq!(kind.create().name(), name);
    }

    #[rstest]
    fn test_kind_deserializes_lowercase() {
        let kind: DialectKind = serde_json::from_str("\"sqlserver\"").unwrap();
        assert_eq!(kind, DialectKind::Sqlserver);
    }

    #[rstest]
    fn test_quote_passes_already_quoted() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.quote("\"name\""), "\"name\"");
        assert_eq!(dialect.quote("\"a\"\"b\""), "\"a\"\"b\"");
        assert_eq!(dialect.quote("name"), "\"name\"");
    }

    #[rstest]
    #[case("\"a\" x\"", "\"\"\"a\"\" x\"\"\"")]
    #[case("\"", "\"\"\"\"")]
    #[case("\"\"\"", "\"\"\"\"\"\"\"\"")]
    fn test_quote_escapes_malformed_quoted(#[case] identifier: &str, #[case] expected: &str) {
        assert_eq!(GenericDialect::new().quote(identifier), expected);
    }

    #[rstest]
    fn test_quote_brackets() {
        let dialect = SqlServerDialect::new();
        assert_eq!(dialect.quote("[a]]b]"), "[a]]b]");
        assert_eq!(dialect.quote("[a]b]"), "[[a]]b]]]");
    }

    #[rstest]
    fn test_default_paging() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.get_paging("SELECT a FROM t", None, 10, 0), "SELECT a FROM t LIMIT 10");
        assert_eq!(
            dialect.get_paging("SELECT a FROM t", Some("ORDER BY a ASC"), 10, 20),
            "SELECT a FROM t ORDER BY a ASC LIMIT 10 OFFSET 20"
        );
    }
}
