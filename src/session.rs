//! Owner of the collaborators a criteria query borrows.

use std::error::Error;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::config::ConfigFile;
use crate::criterion::{Criteria, TypedCriteria};
use crate::db::{Connection, DatabaseConfig};
use crate::dialect::Dialect;
use crate::mapping::{Entity, Mapping};

/// A dialect, mapping and connection that queries are created against.
pub struct Session {
    dialect: Box<dyn Dialect>,
    mapping: Mapping,
    connection: Box<dyn Connection>,
    parameterized: bool,
}

impl Session {
    pub fn new(dialect: Box<dyn Dialect>, mapping: Mapping, connection: Box<dyn Connection>) -> Self {
        Self {
            dialect,
            mapping,
            connection,
            parameterized: true,
        }
    }

    /// Build a session from a loaded config file, connecting if a database
    /// is configured there or in `DATABASE_URL`.
    pub fn from_config(config: &ConfigFile) -> Result<Self, Box<dyn Error>> {
        let dialect = config.dialect.create();
        let database = DatabaseConfig::resolve(config.database.as_ref())?;
        let connection = database.connect(dialect.param_prefix())?;
        info!(
            dialect = dialect.name(),
            backend = connection.backend_name(),
            tables = config.tables.len(),
            "Session ready"
        );
        Ok(Self::new(dialect, config.mapping(), connection).with_parameterized(config.parameterized))
    }

    /// Default render mode for queries created by this session.
    pub fn with_parameterized(mut self, parameterized: bool) -> Self {
        self.parameterized = parameterized;
        self
    }

    pub fn with_dialect(mut self, dialect: Box<dyn Dialect>) -> Self {
        self.dialect = dialect;
        self
    }

    /// Query an entity by name.
    pub fn criteria(&self, entity: &str) -> Criteria<'_> {
        Criteria::for_entity(entity, self.connection.as_ref(), self.dialect.as_ref(), &self.mapping)
            .set_parameterized(self.parameterized)
    }

    /// Query the entity backing `T`, returning untyped rows.
    pub fn criteria_for<T: Entity>(&self) -> Criteria<'_> {
        Criteria::for_type::<T>(self.connection.as_ref(), self.dialect.as_ref(), &self.mapping)
            .set_parameterized(self.parameterized)
    }

    /// Query the entity backing `T`, deserializing rows into `T`.
    pub fn typed<T: Entity + DeserializeOwned>(&self) -> TypedCriteria<'_, T> {
        TypedCriteria::new(self.criteria_for::<T>())
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn connection(&self) -> &dyn Connection {
        self.connection.as_ref()
    }
}
