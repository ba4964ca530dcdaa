use super::{Dialect, FunctionRegistry, NoArgFunction, StandardFunction, VarArgsFunction};

/// Microsoft SQL Server: bracketed identifiers and `OFFSET ... FETCH` paging.
///
/// `OFFSET` is only legal after an `ORDER BY`, so unordered queries are paged
/// with a constant ordering.
#[derive(Debug)]
pub struct SqlServerDialect {
    functions: FunctionRegistry,
}

impl SqlServerDialect {
    pub fn new() -> Self {
        Self {
            functions: FunctionRegistry::standard()
                .with("length", StandardFunction::new("len"))
                .with("now", NoArgFunction::new("getdate()"))
                .with("concat", VarArgsFunction::new("(", " + ", ")")),
        }
    }
}

impl Default for SqlServerDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn open_quote(&self) -> char {
        '['
    }

    fn close_quote(&self) -> char {
        ']'
    }

    fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    fn get_paging(&self, sql: &str, order_by: Option<&str>, limit: u64, offset: u64) -> String {
        format!(
            "{} {} OFFSET {} ROWS FETCH NEXT {} ROWS ONLY",
            sql,
            order_by.unwrap_or("ORDER BY (SELECT NULL)"),
            offset,
            limit
        )
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlserver_paging_without_order() {
        let dialect = SqlServerDialect::new();
        assert_eq!(
            dialect.get_paging("SELECT * FROM [t]", None, 10, 0),
            "SELECT * FROM [t] ORDER BY (SELECT NULL) OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"
        );
    }

    #[test]
    fn test_sqlserver_quoting() {
        let dialect = SqlServerDialect::new();
        assert_eq!(dialect.quote("order"), "[order]");
        assert_eq!(dialect.quote("[order]"), "[order]");
        assert_eq!(dialect.boolean_literal(false), "0");
    }
}
