//! DuckDB connection wrapper with query execution methods.
//!
//! A connection is owned by exactly one case or script and is closed when it
//! is dropped.

use std::path::Path;

use duckdb::arrow::array::Array;
use duckdb::arrow::datatypes::Schema;
use duckdb::arrow::record_batch::RecordBatch;
use duckdb::arrow::util::display::array_value_to_string;
use duckdb::Connection;
use tracing::{debug, info, instrument};

use crate::error::HarnessError;

/// Result of a query execution
pub struct QueryResult {
    pub schema: Schema,
    pub batches: Vec<RecordBatch>,
    pub total_rows: usize,
}

impl QueryResult {
    /// Render every row as text, `None` standing in for SQL NULL.
    pub fn rows(&self) -> Result<Vec<Vec<Option<String>>>, HarnessError> {
        let mut rows = Vec::with_capacity(self.total_rows);
        for batch in &self.batches {
            let column_count = batch.num_columns();
            for row_idx in 0..batch.num_rows() {
                let mut row = Vec::with_capacity(column_count);
                for col_idx in 0..column_count {
                    let column = batch.column(col_idx);
                    if column.is_null(row_idx) {
                        row.push(None);
                    } else {
                        row.push(Some(array_value_to_string(column.as_ref(), row_idx)?));
                    }
                }
                rows.push(row);
            }
        }
        Ok(rows)
    }

    /// First column of the first row.
    pub fn scalar(&self) -> Result<String, HarnessError> {
        let batch = self
            .batches
            .iter()
            .find(|batch| batch.num_rows() > 0)
            .ok_or_else(|| HarnessError::UnexpectedResult("query returned no rows".to_string()))?;
        if batch.num_columns() == 0 {
            return Err(HarnessError::UnexpectedResult(
                "query returned no columns".to_string(),
            ));
        }
        let column = batch.column(0);
        if column.is_null(0) {
            return Err(HarnessError::UnexpectedResult("value is NULL".to_string()));
        }
        Ok(array_value_to_string(column.as_ref(), 0)?)
    }
}

/// Wrapper around duckdb::Connection with execution methods
pub struct DuckDbConnection {
    conn: Connection,
}

impl DuckDbConnection {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Load an extension binary into this connection's function namespace.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load_extension(&self, path: &Path) -> Result<(), HarnessError> {
        let sql = format!("LOAD {};", quote_literal(&path.to_string_lossy()));
        self.conn.execute_batch(&sql).map_err(|source| {
            let engine_version = self
                .engine_version()
                .unwrap_or_else(|_| "unknown".to_string());
            HarnessError::ExtensionLoad {
                path: path.to_path_buf(),
                engine_version,
                source,
            }
        })?;
        info!("loaded extension");
        Ok(())
    }

    /// Version string of the running DuckDB library, e.g. `v1.4.1`.
    pub fn engine_version(&self) -> Result<String, HarnessError> {
        let version = self
            .conn
            .query_row("SELECT version()", [], |row| row.get::<_, String>(0))?;
        Ok(version)
    }

    /// Execute a query and fetch the full result set
    #[instrument(skip(self), fields(sql = %sql))]
    pub fn execute_query(&self, sql: &str) -> Result<QueryResult, HarnessError> {
        reject_nul(sql)?;
        let mut stmt = self.conn.prepare(sql)?;
        let arrow = stmt.query_arrow([])?;
        let schema = arrow.get_schema();

        let mut total_rows = 0usize;
        let batches: Vec<RecordBatch> = arrow
            .inspect(|batch| total_rows += batch.num_rows())
            .collect();

        debug!(batch_count = batches.len(), total_rows, "executed query");
        Ok(QueryResult {
            schema: schema.as_ref().clone(),
            batches,
            total_rows,
        })
    }

    /// Execute a query and return the first column of its first row.
    pub fn run_scalar_query(&self, sql: &str) -> Result<String, HarnessError> {
        self.execute_query(sql)?.scalar()
    }

    /// Execute a single statement (DDL/DML) and return the affected row count
    #[instrument(skip(self), fields(sql = %sql))]
    pub fn execute_statement(&self, sql: &str) -> Result<usize, HarnessError> {
        reject_nul(sql)?;
        let mut stmt = self.conn.prepare(sql)?;
        let affected = stmt.execute([])?;
        debug!(affected, "executed statement");
        Ok(affected)
    }

    /// Execute a batch of SQL statements
    #[instrument(skip(self), fields(sql = %sql))]
    pub fn execute_batch(&self, sql: &str) -> Result<(), HarnessError> {
        reject_nul(sql)?;
        self.conn.execute_batch(sql)?;
        debug!("executed batch");
        Ok(())
    }
}

fn reject_nul(sql: &str) -> Result<(), HarnessError> {
    if sql.contains('\0') {
        return Err(HarnessError::InvalidSql(
            "SQL contains null bytes".to_string(),
        ));
    }
    Ok(())
}

/// Quote a value as a SQL string literal.
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
