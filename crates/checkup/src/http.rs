//! HTTP check evaluation.
//!
//! Sends one request per check and compares the status code and selected
//! response headers with the expectation. Any failure to build or send the
//! request is returned as a [`CheckError`] and aborts the batch.

use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use reqwest::{
    Method,
    header::{HOST, HeaderMap, HeaderName, HeaderValue},
    redirect,
};
use tracing::debug;
use url::Url;

use crate::{
    check::{Evaluate, HttpCheck, HttpExpected, Outcome},
    error::CheckError,
};

#[async_trait]
impl Evaluate for HttpCheck {
    async fn evaluate(&self, timeout: Duration) -> Result<Outcome, CheckError> {
        let method = parse_method(&self.method)?;
        let url = Url::parse(&self.url)
            .map_err(|source| CheckError::InvalidUrl { url: self.url.clone(), source })?;
        let headers = build_headers(&self.headers)?;

        let policy = if self.no_follow_redirect {
            redirect::Policy::none()
        } else {
            redirect::Policy::default()
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(policy)
            .build()
            .map_err(CheckError::Client)?;

        debug!(check = %self.name, %method, %url, ?timeout, "sending request");

        let response = client
            .request(method.clone(), url)
            .headers(headers)
            .send()
            .await
            .map_err(|source| CheckError::Request {
                method: method.to_string(),
                url: self.url.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        let outcome = match_response(status, response.headers(), &self.expected);
        debug!(check = %self.name, status, passed = outcome.passed, "response evaluated");

        Ok(outcome)
    }
}

/// Resolve the configured method, GET when empty
fn parse_method(method: &str) -> Result<Method, CheckError> {
    if method.is_empty() {
        return Ok(Method::GET);
    }

    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| CheckError::InvalidMethod(method.to_string()))
}

/// Convert configured headers into a request header map.
///
/// A `host` key (any case) is stored once as the `Host` header, which the
/// client uses instead of the host taken from the URL.
fn build_headers(configured: &BTreeMap<String, String>) -> Result<HeaderMap, CheckError> {
    let mut headers = HeaderMap::new();

    for (key, value) in configured {
        let invalid = || CheckError::InvalidHeader { name: key.clone() };
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;

        if key.eq_ignore_ascii_case("host") {
            headers.insert(HOST, value);
        } else {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| invalid())?;
            headers.append(name, value);
        }
    }

    Ok(headers)
}

/// Compare a response with the expectation.
///
/// Every expected header counts toward `passed`, but only the last one
/// compared is described in the message.
pub fn match_response(status: u16, headers: &HeaderMap, expected: &HttpExpected) -> Outcome {
    let mut passed = true;

    let status_msg = if status == expected.status_code {
        format!("status code: {status} matches {}\n", expected.status_code)
    } else {
        passed = false;
        format!("status code: {status} does not match {}\n", expected.status_code)
    };

    let mut header_msg = String::new();
    for (name, want) in &expected.headers {
        let got = headers
            .get(name.as_str())
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .unwrap_or_default();

        if got != *want {
            passed = false;
        }
        header_msg = format!("headers: {name} expected {want} got {got}");
    }

    Outcome { passed, message: status_msg + &header_msg }
}
