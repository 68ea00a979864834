use std::path::PathBuf;

use duckdb::arrow::error::ArrowError;
use thiserror::Error;

use crate::config::EXTENSION_BINARY_ENV;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{} is not set; point it at the extension binary under test", EXTENSION_BINARY_ENV)]
    Missing,
    #[error("{} is empty; point it at the extension binary under test", EXTENSION_BINARY_ENV)]
    Empty,
    #[error("unsupported log format: {0}")]
    LogFormat(String),
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("failed to open duckdb connection: {0}")]
    Connection(#[source] duckdb::Error),
    #[error("failed to load extension {} into duckdb {engine_version}: {source}", .path.display())]
    ExtensionLoad {
        path: PathBuf,
        engine_version: String,
        #[source]
        source: duckdb::Error,
    },
    #[error("duckdb error: {0}")]
    Query(#[from] duckdb::Error),
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    #[error("unexpected query result: {0}")]
    UnexpectedResult(String),
    #[error("case {case} failed: expected {expected}, got {actual:?}")]
    Assertion {
        case: String,
        expected: String,
        actual: String,
    },
    #[error("invalid sql: {0}")]
    InvalidSql(String),
}
