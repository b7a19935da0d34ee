//! Checkup - concurrent HTTP and TCP port checks.
//!
//! A run reads a JSON argument file describing a list of checks, evaluates
//! every check concurrently and produces a single [`Report`] with one message
//! per check plus an aggregate pass/fail flag.
//!
//! Assertion mismatches (wrong status code, wrong header, wrong port state)
//! fail the run but keep every message. Errors while performing an HTTP
//! request abort the whole batch and only the error is reported.

pub mod check;
pub mod config;
pub mod error;
pub mod http;
pub mod port;
pub mod report;
pub mod runner;

// Re-export main types
pub use check::{Check, CheckKind, Evaluate, HttpCheck, Outcome, PortCheck};
pub use config::CheckFile;
pub use error::{CheckError, UsageError};
pub use report::Report;
pub use runner::{Runner, Summary};

/// Default timeout for HTTP checks, in seconds
pub const DEFAULT_HTTP_TIMEOUT: u64 = 3;

/// Default timeout for port checks, in seconds
pub const DEFAULT_PORT_TIMEOUT: u64 = 1;
