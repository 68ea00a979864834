//! Case orchestration.
//!
//! Each case gets its own connection from a [`ConnectionSource`]
//! ([`EngineFactory`] in production); the connection is dropped when the case
//! finishes, whether it passed or not.

mod case;
mod expectation;

pub use case::HarnessCase;
pub use expectation::Expectation;

use tracing::{error, info, instrument};

use crate::engine::{DuckDbConnection, EngineFactory};
use crate::error::HarnessError;

/// Hands out a new, exclusively owned connection for every case.
pub trait ConnectionSource {
    fn connect(&self) -> Result<DuckDbConnection, HarnessError>;
}

impl ConnectionSource for EngineFactory {
    fn connect(&self) -> Result<DuckDbConnection, HarnessError> {
        EngineFactory::connect(self)
    }
}

/// Outcome of a single case.
#[derive(Debug)]
pub struct CaseOutcome {
    pub name: String,
    pub result: Result<(), HarnessError>,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a full run, in execution order.
#[derive(Debug, Default)]
pub struct HarnessReport {
    pub outcomes: Vec<CaseOutcome>,
}

impl HarnessReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(CaseOutcome::passed)
    }
}

pub struct Harness<S = EngineFactory> {
    source: S,
}

impl<S: ConnectionSource> Harness<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Take a fresh connection from the source and run `case` on it.
    #[instrument(skip(self, case), fields(case = %case.name))]
    pub fn run_case(&self, case: &HarnessCase) -> Result<(), HarnessError> {
        let conn = self.source.connect()?;
        case.run(&conn)
    }

    /// Run every case in order. A failing case does not stop the others.
    pub fn run_all(&self, cases: &[HarnessCase]) -> HarnessReport {
        let mut report = HarnessReport::default();
        for case in cases {
            let result = self.run_case(case);
            match &result {
                Ok(()) => info!(case = %case.name, "case passed"),
                Err(err) => error!(case = %case.name, error = %err, "case failed"),
            }
            report.outcomes.push(CaseOutcome {
                name: case.name.clone(),
                result,
            });
        }
        info!(
            passed = report.passed(),
            total = report.outcomes.len(),
            "harness run finished"
        );
        report
    }
}
