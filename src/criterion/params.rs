//! Parameter registry for one render of a criteria query.

use crate::db::{Params, Value};

/// Ordered, named store of bound values.
///
/// Auto-generated names are `p_<registry size at registration>`, so the same
/// tree rendered into a fresh registry always yields the same names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamRegistry {
    prefix: String,
    values: Params,
}

impl ParamRegistry {
    /// Create an empty registry emitting placeholders with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            values: Params::new(),
        }
    }

    /// Bind `value` under an auto-generated name and return its placeholder.
    ///
    /// If the generated name was already taken by an explicit registration,
    /// the counter advances until a free name is found.
    pub fn register(&mut self, value: Value) -> String {
        let mut index = self.values.len();
        let mut name = format!("p_{}", index);
        while self.values.contains_key(&name) {
            index += 1;
            name = format!("p_{}", index);
        }
        self.register_named(name, value)
    }

    /// Bind `value` under `name` and return its placeholder.
    pub fn register_named(&mut self, name: impl Into<String>, value: Value) -> String {
        let name = name.into();
        let placeholder = self.placeholder(&name);
        self.values.insert(name, value);
        placeholder
    }

    pub fn placeholder(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &Params {
        &self.values
    }

    pub fn into_values(self) -> Params {
        self.values
    }
}
