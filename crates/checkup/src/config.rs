//! Argument file loading.

use std::{collections::HashSet, fs, path::Path};

use serde::Deserialize;
use tracing::warn;

use crate::{
    check::{Check, CheckKind},
    error::UsageError,
};

/// Contents of the JSON argument file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckFile {
    /// Timeout in seconds for checks without their own
    #[serde(default)]
    pub timeout: Option<i64>,

    #[serde(default)]
    pub checks: Vec<Check>,
}

impl CheckFile {
    /// Read and parse an argument file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, UsageError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| UsageError::Read { path: path.to_path_buf(), source })?;

        Self::from_json(&raw)
    }

    /// Parse argument file contents, rejecting an empty check list
    pub fn from_json(raw: &str) -> Result<Self, UsageError> {
        let file: Self = serde_json::from_str(raw)?;

        if file.checks.is_empty() {
            return Err(UsageError::NoChecks);
        }

        file.warn_suspicious_names();
        Ok(file)
    }

    /// Reject checks that are not of the given variant
    pub fn restrict(self, kind: CheckKind) -> Result<Self, UsageError> {
        if let Some(other) = self.checks.iter().find(|c| c.kind() != kind) {
            return Err(UsageError::WrongKind {
                name: other.name().to_string(),
                found: other.kind(),
                expected: kind,
            });
        }

        Ok(self)
    }

    fn warn_suspicious_names(&self) {
        let mut seen = HashSet::new();

        for check in &self.checks {
            let name = check.name();
            if name.is_empty() {
                warn!(kind = %check.kind(), "check has an empty name");
            }
            if !seen.insert(name) {
                warn!(check = %name, "duplicate check name, only the last result is reported");
            }
        }
    }
}
