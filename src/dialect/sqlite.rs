use super::{Dialect, FunctionRegistry, NoArgFunction};

/// SQLite: ANSI quoting, `:name` placeholders, `1`/`0` booleans.
#[derive(Debug)]
pub struct SqliteDialect {
    functions: FunctionRegistry,
}

impl SqliteDialect {
    pub fn new() -> Self {
        Self {
            functions: FunctionRegistry::standard().with("now", NoArgFunction::new("datetime('now')")),
        }
    }
}

impl Default for SqliteDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn param_prefix(&self) -> &str {
        ":"
    }

    fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }
}
