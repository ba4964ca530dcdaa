//! JSON query files read by the `render` and `run` commands.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::criterion::{Criteria, Expression, Order, Projection};

/// A serialized criteria query.
///
/// ```json
/// {
///   "entity": "Person",
///   "conditions": [{"kind": "simple", "left": {"kind": "field", "name": "age"}, "op": ">", "right": {"kind": "value", "value": 18}}],
///   "orders": [{"expression": {"kind": "field", "name": "name"}}],
///   "limit": 10
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub entity: String,
    #[serde(default)]
    pub conditions: Vec<Expression>,
    #[serde(default)]
    pub projection: Option<Projection>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: u64,
}

impl QuerySpec {
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read query file {}: {}", path.display(), e))?;
        let query = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid query file {}: {}", path.display(), e))?;
        Ok(query)
    }

    /// Add this query's conditions, projection and orders to `criteria`.
    pub fn apply<'a>(&self, criteria: Criteria<'a>) -> Criteria<'a> {
        let criteria = self.conditions.iter().cloned().fold(criteria, Criteria::add);
        let criteria = self.orders.iter().cloned().fold(criteria, Criteria::add_order);
        match &self.projection {
            Some(projection) => criteria.set_projection(projection.clone()),
            None => criteria,
        }
    }
}
