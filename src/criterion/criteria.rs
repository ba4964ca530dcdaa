//! The criteria query: conditions, projection, orders and paging against one
//! mapped entity.

use tracing::debug;

use super::expression::Expression;
use super::order::Order;
use super::params::ParamRegistry;
use super::projection::Projection;
use super::render::Renderer;
use super::CriteriaError;
use crate::db::{query_scalar, run_query, Connection, Params, Row};
use crate::dialect::Dialect;
use crate::mapping::{Entity, EntityTarget, Mapping, Table};

/// A query being assembled for one entity.
///
/// Builder methods consume and return the query. Every SQL render starts from
/// an empty parameter registry, so [`Criteria::parameters`] always describes
/// the most recent render and repeated renders are identical.
pub struct Criteria<'a> {
    connection: &'a dyn Connection,
    dialect: &'a dyn Dialect,
    mapping: &'a Mapping,
    table: Option<&'a Table>,
    target: EntityTarget,
    conditions: Vec<Expression>,
    projection: Option<Projection>,
    orders: Vec<Order>,
    params: Params,
    parameterized: bool,
    total: Option<u64>,
    offset: u64,
}

impl<'a> Criteria<'a> {
    pub fn new(
        target: EntityTarget,
        connection: &'a dyn Connection,
        dialect: &'a dyn Dialect,
        mapping: &'a Mapping,
    ) -> Self {
        let table = mapping.resolve(&target);
        Self {
            connection,
            dialect,
            mapping,
            table,
            target,
            conditions: Vec::new(),
            projection: None,
            orders: Vec::new(),
            params: Params::new(),
            parameterized: true,
            total: None,
            offset: 0,
        }
    }

    /// Query the entity registered under `entity`.
    pub fn for_entity(
        entity: &str,
        connection: &'a dyn Connection,
        dialect: &'a dyn Dialect,
        mapping: &'a Mapping,
    ) -> Self {
        Self::new(EntityTarget::named(entity), connection, dialect, mapping)
    }

    /// Query the entity backing `T`.
    pub fn for_type<T: Entity>(connection: &'a dyn Connection, dialect: &'a dyn Dialect, mapping: &'a Mapping) -> Self {
        Self::new(EntityTarget::of::<T>(), connection, dialect, mapping)
    }

    /// Add a condition; conditions are ANDed together.
    pub fn add(mut self, condition: Expression) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn add_order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    /// Replace the projection.
    pub fn set_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Bind values as parameters (the default) or inline them as literals.
    pub fn set_parameterized(mut self, parameterized: bool) -> Self {
        self.parameterized = parameterized;
        self
    }

    /// Page the rendered select. `total` of `None` means unlimited.
    pub fn set_paging(mut self, total: Option<u64>, offset: u64) -> Self {
        self.total = total;
        self.offset = offset;
        self
    }

    pub fn target(&self) -> &EntityTarget {
        &self.target
    }

    pub fn table(&self) -> Option<&'a Table> {
        self.table
    }

    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    pub fn is_parameterized(&self) -> bool {
        self.parameterized
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn conditions(&self) -> &[Expression] {
        &self.conditions
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    /// Values bound by the most recent render, keyed by name.
    pub fn parameters(&self) -> &Params {
        &self.params
    }

    pub(crate) fn connection(&self) -> &'a dyn Connection {
        self.connection
    }

    /// Execute the paged select and return its rows.
    pub fn list(&mut self, total: Option<u64>, offset: u64) -> Result<Vec<Row>, CriteriaError> {
        let sql = self.prepare_list(total, offset)?;
        Ok(run_query(self.connection, Some(&self.target), &sql, &self.params)?)
    }

    /// Execute with the paging currently configured.
    pub fn list_all(&mut self) -> Result<Vec<Row>, CriteriaError> {
        self.list(self.total, self.offset)
    }

    /// Number of rows the select would return, ignoring paging.
    pub fn count(&mut self) -> Result<i64, CriteriaError> {
        let sql = self.to_sql_count_string()?;
        let values = query_scalar(self.connection, &sql, &self.params)?;
        match values.as_slice() {
            [count] => Ok(*count),
            _ => Err(CriteriaError::Cardinality {
                expected: 1,
                actual: values.len(),
            }),
        }
    }

    /// First row of a one-row page, or `None` if nothing matches.
    pub fn single_or_default(&mut self) -> Result<Option<Row>, CriteriaError> {
        Ok(self.list(Some(1), 0)?.into_iter().next())
    }

    /// Set paging and render the select that `list` executes.
    pub(crate) fn prepare_list(&mut self, total: Option<u64>, offset: u64) -> Result<String, CriteriaError> {
        self.total = total;
        self.offset = offset;
        self.to_sql_string()
    }

    /// Full select with ORDER BY and paging applied.
    pub fn to_sql_string(&mut self) -> Result<String, CriteriaError> {
        self.compile(|criteria, renderer| {
            let select = criteria.render_select(renderer)?;
            let order_by = criteria.render_order_by(renderer)?;
            Ok(match (criteria.total, order_by) {
                (Some(limit), order_by) => {
                    criteria
                        .dialect
                        .get_paging(&select, order_by.as_deref(), limit, criteria.offset)
                }
                (None, Some(order_by)) => format!("{} {}", select, order_by),
                (None, None) => select,
            })
        })
    }

    /// `SELECT COUNT(*)` over the unpaged, unordered select.
    pub fn to_sql_count_string(&mut self) -> Result<String, CriteriaError> {
        self.compile(|criteria, renderer| {
            Ok(format!("SELECT COUNT(*) FROM ({}) t", criteria.render_select(renderer)?))
        })
    }

    /// SELECT, WHERE and GROUP BY without ordering or paging.
    pub fn generate_select(&mut self) -> Result<String, CriteriaError> {
        self.compile(|criteria, renderer| criteria.render_select(renderer))
    }

    /// Run one render pass against a fresh registry and keep its values.
    fn compile<F>(&mut self, render: F) -> Result<String, CriteriaError>
    where
        F: FnOnce(&Self, &mut Renderer<'_>) -> Result<String, CriteriaError>,
    {
        let mut registry = ParamRegistry::new(self.dialect.param_prefix());
        let sql = {
            let mut renderer = Renderer::new(self.dialect, self.table, self.parameterized, &mut registry);
            render(self, &mut renderer)?
        };
        self.params = registry.into_values();

        debug!(
            entity = self.target.entity_name(),
            dialect = self.dialect.name(),
            params = self.params.len(),
            sql = %sql,
            "Rendered criteria"
        );
        Ok(sql)
    }

    fn render_select(&self, renderer: &mut Renderer<'_>) -> Result<String, CriteriaError> {
        let table = self.table.ok_or_else(|| CriteriaError::UnmappedEntity {
            entity: self.target.entity_name().to_string(),
        })?;
        let (catalog, schema) = (self.mapping.catalog(), self.mapping.schema());

        let mut sql = match &self.projection {
            Some(projection) => format!(
                "SELECT {} FROM {}",
                projection.render(renderer)?,
                table.qualified_name(self.dialect, catalog, schema)
            ),
            None => table.to_sql_select(self.dialect, catalog, schema),
        };

        if !self.conditions.is_empty() {
            let conditions = self
                .conditions
                .iter()
                .map(|c| c.render(renderer))
                .collect::<Result<Vec<_>, _>>()?;
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        if let Some(projection) = self.projection.as_ref().filter(|p| p.is_grouped()) {
            sql.push_str(" GROUP BY ");
            sql.push_str(&projection.to_group_string(renderer)?);
        }

        Ok(sql)
    }

    fn render_order_by(&self, renderer: &mut Renderer<'_>) -> Result<Option<String>, CriteriaError> {
        if self.orders.is_empty() {
            return Ok(None);
        }
        let orders = self
            .orders
            .iter()
            .map(|o| o.render(renderer))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(format!("ORDER BY {}", orders.join(", "))))
    }
}
