use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use super::criteria::Criteria;
use super::expression::Expression;
use super::order::Order;
use super::projection::Projection;
use super::CriteriaError;
use crate::db::{query_as, Connection, Params};
use crate::dialect::Dialect;
use crate::mapping::{Entity, Mapping};

/// A [`Criteria`] whose rows are deserialized into `T`.
///
/// Building and rendering are forwarded unchanged; only execution differs.
pub struct TypedCriteria<'a, T> {
    criteria: Criteria<'a>,
    rows: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> TypedCriteria<'a, T> {
    pub fn new(criteria: Criteria<'a>) -> Self {
        Self {
            criteria,
            rows: PhantomData,
        }
    }

    fn map(self, f: impl FnOnce(Criteria<'a>) -> Criteria<'a>) -> Self {
        Self::new(f(self.criteria))
    }

    pub fn add(self, condition: Expression) -> Self {
        self.map(|c| c.add(condition))
    }

    pub fn add_order(self, order: Order) -> Self {
        self.map(|c| c.add_order(order))
    }

    pub fn set_projection(self, projection: Projection) -> Self {
        self.map(|c| c.set_projection(projection))
    }

    pub fn set_parameterized(self, parameterized: bool) -> Self {
        self.map(|c| c.set_parameterized(parameterized))
    }

    pub fn set_paging(self, total: Option<u64>, offset: u64) -> Self {
        self.map(|c| c.set_paging(total, offset))
    }

    pub fn list(&mut self, total: Option<u64>, offset: u64) -> Result<Vec<T>, CriteriaError> {
        let sql = self.criteria.prepare_list(total, offset)?;
        let connection = self.criteria.connection();
        Ok(query_as(
            connection,
            Some(self.criteria.target()),
            &sql,
            self.criteria.parameters(),
        )?)
    }

    pub fn list_all(&mut self) -> Result<Vec<T>, CriteriaError> {
        self.list(self.criteria.total(), self.criteria.offset())
    }

    pub fn single_or_default(&mut self) -> Result<Option<T>, CriteriaError> {
        Ok(self.list(Some(1), 0)?.into_iter().next())
    }

    pub fn count(&mut self) -> Result<i64, CriteriaError> {
        self.criteria.count()
    }

    pub fn to_sql_string(&mut self) -> Result<String, CriteriaError> {
        self.criteria.to_sql_string()
    }

    pub fn to_sql_count_string(&mut self) -> Result<String, CriteriaError> {
        self.criteria.to_sql_count_string()
    }

    pub fn parameters(&self) -> &Params {
        self.criteria.parameters()
    }

    pub fn criteria(&self) -> &Criteria<'a> {
        &self.criteria
    }

    pub fn into_inner(self) -> Criteria<'a> {
        self.criteria
    }
}

impl<'a, T: Entity + DeserializeOwned> TypedCriteria<'a, T> {
    /// Query the entity backing `T`.
    pub fn for_type(connection: &'a dyn Connection, dialect: &'a dyn Dialect, mapping: &'a Mapping) -> Self {
        Self::new(Criteria::for_type::<T>(connection, dialect, mapping))
    }
}
