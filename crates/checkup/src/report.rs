//! The JSON result printed at the end of every run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    error::{CheckError, UsageError},
    runner::Summary,
};

/// Outcome of a run as printed to stdout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Check name to message, or a single `msg` entry on usage/fatal errors
    pub checks: BTreeMap<String, String>,

    /// Always false, checks only observe remote state
    pub changed: bool,

    pub failed: bool,
}

impl Report {
    pub fn new(checks: BTreeMap<String, String>, failed: bool) -> Self {
        Self { checks, changed: false, failed }
    }

    /// Report carrying a single failure message
    pub fn message(msg: impl Into<String>) -> Self {
        Self::new(BTreeMap::from([("msg".to_string(), msg.into())]), true)
    }

    pub fn usage(error: &UsageError) -> Self {
        Self::message(error.to_string())
    }

    /// Report for an error that aborted the batch, including its causes
    pub fn fatal(error: CheckError) -> Self {
        Self::message(format!("{:#}", anyhow::Error::new(error)))
    }

    pub fn exit_code(&self) -> i32 {
        if self.failed { 1 } else { 0 }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            let msg = format!("failed to encode report: {e}");
            format!(r#"{{"checks":{{"msg":{msg:?}}},"changed":false,"failed":true}}"#)
        })
    }

    /// Print the report as one JSON line and return the exit code
    pub fn emit(&self) -> i32 {
        println!("{}", self.to_json());
        self.exit_code()
    }
}

impl From<Summary> for Report {
    fn from(summary: Summary) -> Self {
        Self::new(summary.results, !summary.passed)
    }
}

impl From<Result<Summary, CheckError>> for Report {
    fn from(result: Result<Summary, CheckError>) -> Self {
        match result {
            Ok(summary) => summary.into(),
            Err(e) => Self::fatal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passing_summary() {
        let summary = Summary {
            results: BTreeMap::from([(
                "web".to_string(),
                "status code: 200 matches 200\n".to_string(),
            )]),
            passed: true,
        };

        let report = Report::from(summary);
        assert!(!report.failed);
        assert!(!report.changed);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(
            report.to_json(),
            r#"{"checks":{"web":"status code: 200 matches 200\n"},"changed":false,"failed":false}"#
        );
    }

    #[test]
    fn test_failing_summary() {
        let summary = Summary {
            results: BTreeMap::from([
                ("a".to_string(), "is OPEN and expected to be OPEN".to_string()),
                ("b".to_string(), "is CLOSED and expected to be OPEN".to_string()),
            ]),
            passed: false,
        };

        let report = Report::from(summary);
        assert!(report.failed);
        assert_eq!(report.checks.len(), 2);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_usage_report() {
        let report = Report::usage(&UsageError::NoChecks);
        assert_eq!(
            report.to_json(),
            r#"{"checks":{"msg":"no checks defined"},"changed":false,"failed":true}"#
        );
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_fatal_report_includes_cause() {
        let source = url::Url::parse("not a url").unwrap_err();
        let error = CheckError::InvalidUrl { url: "not a url".to_string(), source };
        let report = Report::from(Err::<Summary, _>(error));

        assert!(report.failed);
        assert_eq!(report.checks.len(), 1);
        assert_eq!(report.checks["msg"], r#"parse "not a url": relative URL without a base"#);
    }
}
