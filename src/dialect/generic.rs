use super::{Dialect, FunctionRegistry};

/// ANSI-flavored dialect: double-quoted identifiers, `@` placeholders,
/// `LIMIT`/`OFFSET` paging.
#[derive(Debug)]
pub struct GenericDialect {
    functions: FunctionRegistry,
}

impl GenericDialect {
    pub fn new() -> Self {
        Self {
            functions: FunctionRegistry::standard(),
        }
    }
}

impl Default for GenericDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }
}
