//! DuckDB engine module - connection setup and query execution.
//!
//! This module provides:
//! - `DuckDbConnection`: Wrapper around duckdb::Connection with execution methods
//! - `EngineFactory`: Factory for fresh connections with the extension binary loaded
//! - `QueryResult`: Query execution results

pub mod connection;
mod factory;

pub use connection::{DuckDbConnection, QueryResult};
pub use factory::EngineFactory;
