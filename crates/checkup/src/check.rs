use std::{collections::BTreeMap, fmt, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

use crate::{DEFAULT_HTTP_TIMEOUT, DEFAULT_PORT_TIMEOUT, error::CheckError};

/// Variant of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Http,
    Port,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Http => write!(f, "HTTP"),
            CheckKind::Port => write!(f, "port"),
        }
    }
}

/// Result of evaluating a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub passed: bool,
    pub message: String,
}

impl Outcome {
    pub fn pass(message: impl Into<String>) -> Self {
        Self { passed: true, message: message.into() }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self { passed: false, message: message.into() }
    }
}

/// Evaluator trait shared by every check variant
#[async_trait]
pub trait Evaluate: Send + Sync {
    /// Perform the network operation once and compare it to the expectation.
    ///
    /// `Err` means the whole batch must be aborted; a mismatch is an `Ok`
    /// outcome with `passed == false`.
    async fn evaluate(&self, timeout: Duration) -> Result<Outcome, CheckError>;
}

/// Expected outcome of an HTTP check
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpExpected {
    pub status_code: u16,

    /// Response headers that must be present with these exact values.
    /// Empty skips header checks.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// A single HTTP request check
#[derive(Debug, Clone, Deserialize)]
pub struct HttpCheck {
    #[serde(default)]
    pub name: String,

    /// Timeout in seconds, 0 or less selects the default
    #[serde(default)]
    pub timeout: i64,

    /// HTTP method, GET when empty
    #[serde(default)]
    pub method: String,

    pub url: String,

    /// Request headers. A `host` key overrides the virtual host.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default)]
    pub no_follow_redirect: bool,

    pub expected: HttpExpected,
}

/// Expected outcome of a port check
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PortExpected {
    pub open: bool,
}

/// A single TCP port check
#[derive(Debug, Clone, Deserialize)]
pub struct PortCheck {
    #[serde(default)]
    pub name: String,

    /// Timeout in seconds, 0 or less selects the default
    #[serde(default)]
    pub timeout: i64,

    pub host: String,
    pub port: u16,
    pub expected: PortExpected,
}

impl PortCheck {
    /// Host without the brackets of a `[v6]` literal
    pub fn bare_host(&self) -> &str {
        self.host
            .strip_prefix('[')
            .and_then(|host| host.strip_suffix(']'))
            .unwrap_or(&self.host)
    }

    /// Target address in `host:port` form
    pub fn address(&self) -> String {
        let host = self.bare_host();
        if host.contains(':') {
            format!("[{host}]:{}", self.port)
        } else {
            format!("{host}:{}", self.port)
        }
    }
}

/// Any configured check. Entries with a `url` are HTTP checks, entries with
/// `host` or `port` are port checks.
#[derive(Debug, Clone)]
pub enum Check {
    Http(HttpCheck),
    Port(PortCheck),
}

impl<'de> Deserialize<'de> for Check {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        if value.get("url").is_some() {
            HttpCheck::deserialize(value).map(Check::Http).map_err(de::Error::custom)
        } else if value.get("host").is_some() || value.get("port").is_some() {
            PortCheck::deserialize(value).map(Check::Port).map_err(de::Error::custom)
        } else {
            Err(de::Error::custom("check needs either `url` or `host` and `port`"))
        }
    }
}

impl Check {
    pub fn name(&self) -> &str {
        match self {
            Check::Http(c) => &c.name,
            Check::Port(c) => &c.name,
        }
    }

    pub fn kind(&self) -> CheckKind {
        match self {
            Check::Http(_) => CheckKind::Http,
            Check::Port(_) => CheckKind::Port,
        }
    }

    /// Deadline for this check.
    ///
    /// The check's own timeout wins when positive, then `fallback` (the
    /// file-level timeout) when positive, then the variant default.
    pub fn effective_timeout(&self, fallback: Option<i64>) -> Duration {
        let (own, default_secs) = match self {
            Check::Http(c) => (c.timeout, DEFAULT_HTTP_TIMEOUT),
            Check::Port(c) => (c.timeout, DEFAULT_PORT_TIMEOUT),
        };

        let secs = [Some(own), fallback]
            .into_iter()
            .flatten()
            .find_map(|secs| u64::try_from(secs).ok().filter(|secs| *secs > 0))
            .unwrap_or(default_secs);

        Duration::from_secs(secs)
    }
}

#[async_trait]
impl Evaluate for Check {
    async fn evaluate(&self, timeout: Duration) -> Result<Outcome, CheckError> {
        match self {
            Check::Http(c) => c.evaluate(timeout).await,
            Check::Port(c) => c.evaluate(timeout).await,
        }
    }
}
