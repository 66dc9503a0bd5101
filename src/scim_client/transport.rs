//! Request dispatch and response classification.
//!
//! Every outcome of a round-trip is normalized into one of the three
//! [`ScimFailure`] shapes or a parsed JSON payload:
//!
//! 1. no response (DNS, TLS, refused connection, timeout) → `Transport`
//! 2. non-2xx response → `Http`, with the message taken from the body's
//!    `error` or `detail` field or else the status line
//! 3. 2xx response → the parsed body; an empty body counts as `{}` and a
//!    body that is not JSON becomes `Local("invalid response body")`

use super::core::ScimClient;
use crate::config::LogLevel;
use crate::error::{ScimFailure, ScimResult};
use crate::resource::ListResponse;
use log::{debug, error, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::sync::atomic::Ordering;
use url::Url;

/// Media type of SCIM request bodies.
pub const SCIM_CONTENT_TYPE: &str = "application/scim+json";
const SCIM_ACCEPT: &str = "application/scim+json, application/json";

impl ScimClient {
    /// GET a single resource.
    pub(super) fn get(&self, url: Url) -> ScimResult<Value> {
        self.dispatch(Method::GET, url, None)
    }

    /// GET a list or search endpoint and return its `Resources`.
    ///
    /// Only the page returned by the service is used; when it reports more
    /// results than it returned a warning is logged regardless of the
    /// configured log level.
    pub(super) fn get_list(&self, url: Url) -> ScimResult<Vec<Value>> {
        let list = ListResponse::from_value(self.get(url)?)?;

        if list.is_truncated() {
            warn!(
                "{} service reported {} results but returned {}",
                self.log_context(),
                list.total_results.unwrap_or_default(),
                list.resources().len()
            );
        }
        Ok(list.into_resources())
    }

    /// Send a request with a JSON body.
    pub(super) fn send_json<T>(&self, method: Method, url: Url, body: &T) -> ScimResult<Value>
    where
        T: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(body).map_err(|e| ScimFailure::local(e.to_string()))?;
        self.dispatch(method, url, Some(bytes))
    }

    /// Perform exactly one round-trip and classify the outcome.
    ///
    /// The call counter is incremented before the request is sent.
    fn dispatch(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> ScimResult<Value> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.logs(LogLevel::Debug) {
            debug!("{} send {} {}", self.log_context(), method, url);
        }

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .bearer_auth(self.config.token())
            .header(ACCEPT, SCIM_ACCEPT)
            .header(CONTENT_TYPE, SCIM_CONTENT_TYPE);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().map_err(|e| self.transport_failure(&method, &url, &e))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .map_err(|e| self.transport_failure(&method, &url, &e))?;

        if self.logs(LogLevel::Debug) {
            debug!(
                "{} {} {} -> {} ({} bytes)",
                self.log_context(),
                method,
                url,
                status,
                bytes.len()
            );
        }

        classify_response(status, &bytes)
    }

    fn transport_failure(&self, method: &Method, url: &Url, err: &reqwest::Error) -> ScimFailure {
        let reason = error_chain(err);
        if self.logs(LogLevel::Error) {
            error!(
                "{} error sending {} {}: {}",
                self.log_context(),
                method,
                url,
                reason
            );
        }
        ScimFailure::transport(reason)
    }
}

/// Classify a received response into a payload or a failure.
pub fn classify_response(status: StatusCode, body: &[u8]) -> ScimResult<Value> {
    if !status.is_success() {
        return Err(ScimFailure::http(status.as_u16(), error_message(status, body)));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(body).map_err(|_| ScimFailure::invalid_response_body())
}

/// Best-effort message for a non-2xx response.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "detail"].iter().find_map(|key| {
                value
                    .get(key)
                    .and_then(Value::as_str)
                    .filter(|message| !message.trim().is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| status_line(status))
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => format!("HTTP status {}", status.as_u16()),
    }
}

/// The error and all of its sources, joined with `: `.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !reason.contains(&text) {
            reason.push_str(": ");
            reason.push_str(&text);
        }
        source = cause.source();
    }
    if reason.trim().is_empty() {
        reason = "request failed without a response".to_string();
    }
    reason
}
