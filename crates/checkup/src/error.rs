use std::{io, path::PathBuf};

use thiserror::Error;

use crate::check::CheckKind;

/// Problems with the invocation itself, detected before any network I/O.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("incorrect num of args")]
    ArgCount,
    #[error("open {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
    #[error("no checks defined")]
    NoChecks,
    #[error("check {name:?} has type {found}, expected {expected}")]
    WrongKind { name: String, found: CheckKind, expected: CheckKind },
}

/// Errors that abort the whole batch of checks.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("parse {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid method {0:?}")]
    InvalidMethod(String),
    #[error("invalid header {name:?}")]
    InvalidHeader { name: String },
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("{method} {url}")]
    Request {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("check task ended before reporting a result")]
    TaskLost,
}
