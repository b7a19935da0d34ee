//! Concurrent execution of a batch of checks.

use std::collections::BTreeMap;

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::{
    check::{Check, Evaluate},
    config::CheckFile,
    error::CheckError,
};

/// Aggregate of every check that completed without a fatal error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Check name to message. Duplicate names keep the last reported result.
    pub results: BTreeMap<String, String>,

    /// Logical AND of every check's outcome
    pub passed: bool,
}

/// Runs checks concurrently, one task per check
pub struct Runner {
    checks: Vec<Check>,
    timeout: Option<i64>,
}

impl Runner {
    pub fn new(checks: Vec<Check>) -> Self {
        Self { checks, timeout: None }
    }

    /// Timeout in seconds for checks that do not set their own
    pub fn with_timeout(mut self, timeout: Option<i64>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Number of checks that will be run
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Evaluate every check and collect the results.
    ///
    /// The first fatal error is returned as soon as it arrives. Tasks still
    /// in flight are neither awaited nor cancelled.
    pub async fn run(self) -> Result<Summary, CheckError> {
        let total = self.checks.len();
        let (result_tx, mut result_rx) = mpsc::channel(total.max(1));

        for check in self.checks {
            let result_tx = result_tx.clone();
            let timeout = check.effective_timeout(self.timeout);

            tokio::spawn(async move {
                let result = check.evaluate(timeout).await;

                // The receiver is gone once the batch has been aborted.
                let _ = result_tx.send((check.name().to_string(), result)).await;
            });
        }
        drop(result_tx);

        let mut summary = Summary { results: BTreeMap::new(), passed: true };

        for _ in 0..total {
            let Some((name, result)) = result_rx.recv().await else {
                error!(
                    received = summary.results.len(),
                    total,
                    "check task exited without a result"
                );
                return Err(CheckError::TaskLost);
            };

            match result {
                Ok(outcome) => {
                    debug!(check = %name, passed = outcome.passed, "check finished");
                    summary.passed &= outcome.passed;
                    summary.results.insert(name, outcome.message);
                }
                Err(e) => {
                    error!(check = %name, error = %e, "check failed fatally, aborting run");
                    return Err(e);
                }
            }
        }

        Ok(summary)
    }
}

impl From<CheckFile> for Runner {
    fn from(file: CheckFile) -> Self {
        Runner::new(file.checks).with_timeout(file.timeout)
    }
}
