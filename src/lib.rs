//! criteria library - dialect-aware SQL criteria compiler
//!
//! Builds SELECT, COUNT and paged queries from a tree of condition,
//! projection and order nodes, rendering them for a pluggable SQL dialect
//! with named bind parameters. Execution goes through a `Connection`; a
//! PostgreSQL implementation is included.

pub mod cli;
pub mod commands;
pub mod config;
pub mod criterion;
pub mod db;
pub mod dialect;
pub mod mapping;
pub mod output;
pub mod session;

pub use criterion::{Criteria, CriteriaError, TypedCriteria};
pub use session::Session;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;
