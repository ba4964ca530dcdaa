use super::{Dialect, FunctionRegistry, NoArgFunction};

/// PostgreSQL: native `ilike`, `:name` placeholders.
///
/// `PostgresConnection` rewrites the named placeholders to `$n` before
/// execution.
#[derive(Debug)]
pub struct PostgresDialect {
    functions: FunctionRegistry,
}

impl PostgresDialect {
    pub fn new() -> Self {
        Self {
            functions: FunctionRegistry::standard().with("now", NoArgFunction::new("now()")),
        }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn param_prefix(&self) -> &str {
        ":"
    }

    fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    fn supports_ilike(&self) -> bool {
        true
    }
}
