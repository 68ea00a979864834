//! DuckDB connection factory.
//!
//! Every connection is a fresh in-memory database that accepts unsigned
//! extensions, so a case never observes state left behind by another one.

use std::path::{Path, PathBuf};

use duckdb::{Config, Connection};
use tracing::{info, instrument};

use crate::config::HarnessConfig;
use crate::engine::connection::DuckDbConnection;
use crate::error::HarnessError;

/// Produces connections with the configured extension binary loaded.
#[derive(Debug, Clone)]
pub struct EngineFactory {
    extension_binary: PathBuf,
}

impl EngineFactory {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            extension_binary: config.extension_binary().to_path_buf(),
        }
    }

    pub fn extension_binary(&self) -> &Path {
        &self.extension_binary
    }

    /// Open a transient connection without loading anything into it.
    #[instrument(skip(self))]
    pub fn open_connection(&self) -> Result<DuckDbConnection, HarnessError> {
        let config = Config::default()
            .allow_unsigned_extensions()
            .map_err(HarnessError::Connection)?;
        let conn =
            Connection::open_in_memory_with_flags(config).map_err(HarnessError::Connection)?;
        Ok(DuckDbConnection::new(conn))
    }

    /// Open a transient connection and load the extension binary into it.
    #[instrument(skip(self), fields(extension = %self.extension_binary.display()))]
    pub fn connect(&self) -> Result<DuckDbConnection, HarnessError> {
        let conn = self.open_connection()?;
        conn.load_extension(&self.extension_binary)?;
        info!("opened duckdb connection with extension loaded");
        Ok(conn)
    }
}
