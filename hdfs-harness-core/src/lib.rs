pub mod config;
pub mod engine;
pub mod error;
pub mod harness;
pub mod sql_parser;

pub use config::{HarnessConfig, LogFormat, EXTENSION_BINARY_ENV};
pub use engine::{DuckDbConnection, EngineFactory, QueryResult};
pub use error::{ConfigurationError, HarnessError};
pub use harness::{CaseOutcome, ConnectionSource, Expectation, Harness, HarnessCase, HarnessReport};
