//! SQL function renderers and the per-dialect function registry.

use std::collections::BTreeMap;
use std::fmt::Debug;

/// Renders a function call from already-rendered argument fragments.
pub trait SqlFunction: Debug + Send + Sync {
    fn render(&self, args: &[String]) -> String;
}

/// `name(arg1, arg2, ...)`
#[derive(Debug, Clone)]
pub struct StandardFunction {
    name: String,
}

impl StandardFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SqlFunction for StandardFunction {
    fn render(&self, args: &[String]) -> String {
        format!("{}({})", self.name, args.join(", "))
    }
}

/// A fixed SQL fragment that ignores its arguments, e.g. `current_timestamp`.
#[derive(Debug, Clone)]
pub struct NoArgFunction {
    sql: String,
}

impl NoArgFunction {
    pub fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }
}

impl SqlFunction for NoArgFunction {
    fn render(&self, _args: &[String]) -> String {
        self.sql.clone()
    }
}

/// Arguments joined by an operator or separator, e.g. `(a || b)`.
#[derive(Debug, Clone)]
pub struct VarArgsFunction {
    begin: String,
    separator: String,
    end: String,
}

impl VarArgsFunction {
    pub fn new(begin: impl Into<String>, separator: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            separator: separator.into(),
            end: end.into(),
        }
    }
}

impl SqlFunction for VarArgsFunction {
    fn render(&self, args: &[String]) -> String {
        format!("{}{}{}", self.begin, args.join(self.separator.as_str()), self.end)
    }
}

/// Functions known to a dialect, keyed by lowercase name.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, Box<dyn SqlFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates and scalar functions every supported dialect spells the same way.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for name in ["count", "sum", "avg", "min", "max", "lower", "upper", "abs", "coalesce", "length"] {
            registry = registry.with(name, StandardFunction::new(name));
        }
        registry
            .with("now", NoArgFunction::new("current_timestamp"))
            .with("concat", VarArgsFunction::new("(", " || ", ")"))
    }

    /// Register `function` under `name`, replacing any existing entry.
    pub fn with(mut self, name: &str, function: impl SqlFunction + 'static) -> Self {
        self.functions.insert(name.to_lowercase(), Box::new(function));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn SqlFunction> {
        self.functions.get(&name.to_lowercase()).map(|f| &**f)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    fn test_standard_function() {
        let f = StandardFunction::new("coalesce");
        assert_eq!(f.render(&args(&["a", "0"])), "coalesce(a, 0)");
    }

    #[rstest]
    fn test_no_arg_function_ignores_arguments() {
        let f = NoArgFunction::new("current_timestamp");
        assert_eq!(f.render(&args(&["x"])), "current_timestamp");
    }

    #[rstest]
    fn test_var_args_function() {
        let f = VarArgsFunction::new("(", " || ", ")");
        assert_eq!(f.render(&args(&["a", "b", "c"])), "(a || b || c)");
    }

    #[rstest]
    fn test_registry_lookup_is_case_insensitive() {
        let registry = FunctionRegistry::standard();
        assert!(registry.get("COUNT").is_some());
        assert!(registry.contains("Sum"));
        assert!(registry.get("median").is_none());
    }

    #[rstest]
    fn test_registry_override() {
        let registry = FunctionRegistry::standard().with("length", StandardFunction::new("len"));
        assert_eq!(registry.get("length").unwrap().render(&args(&["x"])), "len(x)");
    }
}
