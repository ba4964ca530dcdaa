//! Entity-to-table mapping metadata.
//!
//! The compiler needs three things from the mapping layer: the qualified table
//! name, the default "select all mapped columns" fragment, and field → column
//! lookup. `Mapping` holds tables keyed by entity name; Rust types opt in via
//! the [`Entity`] trait.

use std::any::type_name;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;

/// A Rust type that maps to a table.
pub trait Entity {
    /// Entity name used to look the table up in a [`Mapping`].
    const ENTITY: &'static str;
}

/// Identity of the entity a query targets.
///
/// Either a Rust type token or a bare entity name; the two are mutually
/// exclusive for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityTarget {
    Type {
        type_name: &'static str,
        entity: &'static str,
    },
    Name(String),
}

impl EntityTarget {
    /// Target the entity backing `T`.
    pub fn of<T: Entity>() -> Self {
        Self::Type {
            type_name: type_name::<T>(),
            entity: T::ENTITY,
        }
    }

    /// Target an entity by name.
    pub fn named(entity: impl Into<String>) -> Self {
        Self::Name(entity.into())
    }

    pub fn entity_name(&self) -> &str {
        match self {
            Self::Type { entity, .. } => entity,
            Self::Name(name) => name,
        }
    }
}

/// A mapped column: logical field name and physical column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub field: String,
    pub name: String,
}

impl Column {
    pub fn new(field: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            name: name.into(),
        }
    }

    pub fn quoted_name(&self, dialect: &dyn Dialect) -> String {
        dialect.quote(&self.name)
    }

    /// Select-list entry; a renamed column is aliased back to its field name.
    pub fn select_item(&self, dialect: &dyn Dialect) -> String {
        if self.field == self.name {
            self.quoted_name(dialect)
        } else {
            format!("{} AS {}", self.quoted_name(dialect), dialect.quote(&self.field))
        }
    }
}

/// Table metadata for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Add a column whose name equals its field name.
    pub fn column(self, field: &str) -> Self {
        self.mapped_column(field, field)
    }

    /// Add a column with an explicit physical name.
    pub fn mapped_column(mut self, field: &str, name: &str) -> Self {
        self.columns.push(Column::new(field, name));
        self
    }

    pub fn find_column_by_field_name(&self, field: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Quoted `catalog.schema.table` name; absent parts are skipped.
    pub fn qualified_name(&self, dialect: &dyn Dialect, catalog: Option<&str>, schema: Option<&str>) -> String {
        [catalog, schema, Some(self.name.as_str())]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .map(|part| dialect.quote(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// `SELECT <all mapped columns> FROM <qualified name>`.
    ///
    /// Result columns carry field names so rows deserialize into the entity.
    /// A table without column metadata selects `*`.
    pub fn to_sql_select(&self, dialect: &dyn Dialect, catalog: Option<&str>, schema: Option<&str>) -> String {
        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns
                .iter()
                .map(|c| c.select_item(dialect))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("SELECT {} FROM {}", columns, self.qualified_name(dialect, catalog, schema))
    }
}

/// Registry of tables plus the catalog/schema they live in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    tables: BTreeMap<String, Table>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Register `table` under `entity`, replacing any previous registration.
    pub fn add_table(mut self, entity: impl Into<String>, table: Table) -> Self {
        self.tables.insert(entity.into(), table);
        self
    }

    /// Register the table backing `T`.
    pub fn add_entity<T: Entity>(self, table: Table) -> Self {
        self.add_table(T::ENTITY, table)
    }

    pub fn find_table(&self, entity: &str) -> Option<&Table> {
        self.tables.get(entity)
    }

    pub fn find_table_for<T: Entity>(&self) -> Option<&Table> {
        self.find_table(T::ENTITY)
    }

    pub fn resolve(&self, target: &EntityTarget) -> Option<&Table> {
        self.find_table(target.entity_name())
    }

    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}
