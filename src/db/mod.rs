//! Execution layer consumed by the criteria compiler.
//!
//! This module provides the collaborator side of the compiler:
//! - The `Connection` trait that runs compiled SQL with a parameter map
//! - Backend-agnostic `Value`s and result `Row`s
//! - Typed and scalar query helpers used by `list`, `count` and the typed facade
//! - A PostgreSQL connection and its configuration
//!
//! # Design Notes
//!
//! **Named parameters**
//! The compiler emits placeholders as dialect prefix + name (`@p_0`) and hands
//! over a sorted name → value map. Backends that bind positionally
//! (PostgreSQL) rewrite names to positions themselves.
//!
//! **Typed results**
//! Rows are converted to JSON objects keyed by column name before
//! deserializing, so result types are matched by field name, not position.

mod backend;
mod config;
mod escape;
mod postgres;
mod query;
mod value;

pub use backend::{BoxError, Connection, Disconnected, Params, QueryResult, Row};
pub use config::{DatabaseConfig, PostgresConfig};
pub use escape::{escape_string_for_quote, quote_identifier, quote_literal};
pub use self::postgres::{rewrite_placeholders, PostgresConnection};
pub use query::{query_as, query_scalar, run_query};
pub use value::Value;

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to connect to {backend}: {message}")]
    ConnectFailed { backend: &'static str, message: String },

    #[error("Invalid database configuration: {message}")]
    InvalidConfig { message: String },

    /// Errors raised by the backend itself, surfaced unchanged.
    #[error(transparent)]
    Execution(BoxError),

    #[error("Failed to deserialize result row: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("Expected a single column in scalar result, found {count}")]
    UnexpectedColumns { count: usize },

    #[error("Expected an integer scalar, found {type_name}")]
    InvalidScalar { type_name: &'static str },
}
