use super::{with_order, Dialect, FunctionRegistry, StandardFunction};
use crate::db::quote_literal;

/// MySQL / MariaDB: backtick identifiers, `LIMIT offset, count` paging and a
/// NOT operator whose operand is always parenthesized.
///
/// Backslash is an escape character inside MySQL string literals unless
/// `NO_BACKSLASH_ESCAPES` is set, so literals escape it as well.
#[derive(Debug)]
pub struct MySqlDialect {
    functions: FunctionRegistry,
}

impl MySqlDialect {
    pub fn new() -> Self {
        Self {
            functions: FunctionRegistry::standard()
                .with("concat", StandardFunction::new("concat"))
                .with("length", StandardFunction::new("char_length")),
        }
    }
}

impl Default for MySqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn open_quote(&self) -> char {
        '`'
    }

    fn close_quote(&self) -> char {
        '`'
    }

    fn param_prefix(&self) -> &str {
        ":"
    }

    fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    fn get_paging(&self, sql: &str, order_by: Option<&str>, limit: u64, offset: u64) -> String {
        let paged = with_order(sql, order_by);
        if offset > 0 {
            format!("{} LIMIT {}, {}", paged, offset, limit)
        } else {
            format!("{} LIMIT {}", paged, limit)
        }
    }

    fn quote_literal(&self, value: &str) -> String {
        quote_literal(&value.replace('\\', "\\\\"))
    }

    fn parenthesize_not_operand(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_paging_puts_offset_first() {
        let dialect = MySqlDialect::new();
        assert_eq!(
            dialect.get_paging("SELECT * FROM t", Some("ORDER BY a DESC"), 5, 10),
            "SELECT * FROM t ORDER BY a DESC LIMIT 10, 5"
        );
        assert_eq!(dialect.get_paging("SELECT * FROM t", None, 5, 0), "SELECT * FROM t LIMIT 5");
    }

    #[test]
    fn test_mysql_literal_escapes_backslash_and_quote() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.quote_literal(r"a\b"), r"'a\\b'");
        assert_eq!(dialect.quote_literal(r"x\'y"), r"'x\\''y'");
    }

    #[test]
    fn test_mysql_concat_is_a_function() {
        let dialect = MySqlDialect::new();
        let args = vec!["a".to_string(), "b".to_string()];
        assert_eq!(dialect.find_function("concat").unwrap().render(&args), "concat(a, b)");
    }
}
