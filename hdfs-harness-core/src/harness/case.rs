use tracing::{debug, instrument};

use crate::engine::DuckDbConnection;
use crate::error::HarnessError;
use crate::harness::expectation::Expectation;

/// One scalar-function check: run `sql`, expect exactly one row with one
/// column matching `expectation`.
#[derive(Debug, Clone)]
pub struct HarnessCase {
    pub name: String,
    pub sql: String,
    pub expectation: Expectation,
}

impl HarnessCase {
    pub fn new(name: impl Into<String>, sql: impl Into<String>, expectation: Expectation) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
            expectation,
        }
    }

    /// `hdfs('Sam')` must return exactly `Hdfs Sam 🐥`.
    pub fn hdfs_greeting() -> Self {
        Self::new(
            "hdfs",
            "SELECT hdfs('Sam') AS value;",
            Expectation::exact("Hdfs Sam 🐥"),
        )
    }

    /// `hdfs_openssl_version('Michael')` must report the linked OpenSSL; the
    /// version text itself depends on the build.
    pub fn hdfs_openssl_version() -> Self {
        Self::new(
            "hdfs_openssl_version",
            "SELECT hdfs_openssl_version('Michael') AS value;",
            Expectation::prefix("Hdfs Michael, my linked OpenSSL version is OpenSSL"),
        )
    }

    /// The cases every hdfs extension build must pass.
    pub fn defaults() -> Vec<Self> {
        vec![Self::hdfs_greeting(), Self::hdfs_openssl_version()]
    }

    /// Run the query on `conn` and check the single value it returns.
    #[instrument(skip(self, conn), fields(case = %self.name))]
    pub fn run(&self, conn: &DuckDbConnection) -> Result<(), HarnessError> {
        let result = conn.execute_query(&self.sql)?;
        let rows = result.rows()?;
        let value = match rows.as_slice() {
            [row] => match row.as_slice() {
                [Some(value)] => value.clone(),
                [None] => {
                    return Err(HarnessError::UnexpectedResult(format!(
                        "case {} returned NULL",
                        self.name
                    )))
                }
                other => {
                    return Err(HarnessError::UnexpectedResult(format!(
                        "case {} returned {} columns, expected 1",
                        self.name,
                        other.len()
                    )))
                }
            },
            other => {
                return Err(HarnessError::UnexpectedResult(format!(
                    "case {} returned {} rows, expected 1",
                    self.name,
                    other.len()
                )))
            }
        };
        debug!(%value, "case produced value");

        if !self.expectation.matches(&value) {
            return Err(HarnessError::Assertion {
                case: self.name.clone(),
                expected: self.expectation.to_string(),
                actual: value,
            });
        }
        Ok(())
    }
}
