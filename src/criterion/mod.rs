//! Criteria query compiler.
//!
//! A [`Criteria`] collects condition, projection and order nodes for one
//! mapped entity and compiles them to SQL for a [`Dialect`](crate::dialect::Dialect).
//! Nodes are plain data ([`Expression`], [`Projection`], [`Order`]) and render
//! through a [`CriteriaRender`], which is the only place dialect lookups and
//! parameter binding happen.

pub mod clauses;
mod criteria;
mod expression;
mod order;
mod params;
mod projection;
mod render;
mod typed;

pub use criteria::Criteria;
pub use expression::{Expression, JunctionKind, MatchMode};
pub use order::Order;
pub use params::ParamRegistry;
pub use projection::Projection;
pub use render::{CriteriaRender, Renderer};
pub use typed::TypedCriteria;

use thiserror::Error;

use crate::db::DbError;

#[derive(Error, Debug)]
pub enum CriteriaError {
    #[error("Function '{function}' is not defined for the {dialect} dialect")]
    FunctionNotFound { function: String, dialect: &'static str },

    #[error("No table mapping for entity '{entity}'")]
    UnmappedEntity { entity: String },

    #[error("Cannot inline {value} as a SQL literal")]
    InvalidLiteral { value: String },

    #[error("Expected {expected} row(s), got {actual}")]
    Cardinality { expected: usize, actual: usize },

    #[error(transparent)]
    Db(#[from] DbError),
}
