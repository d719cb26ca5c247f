//! Fetch error classification.
//!
//! The four failure kinds matter only for diagnostics; views see a single
//! human-readable message through [`FetchFailure`].

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while reading from the backend.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Descriptor does not resolve to an absolute URL
    #[error("Invalid request URL '{url}'")]
    InvalidUrl { url: String },

    /// Transport-level failure (DNS, connect, timeout, reset)
    #[error("Network failure: {message}")]
    Network { message: String },

    /// Non-2xx response
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Body is not valid JSON or does not match the expected shape
    #[error("Invalid response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// 200 response flagged as a failure by its payload
    #[error("{message}")]
    Application { message: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "could not connect to server".to_string()
        } else {
            err.to_string()
        };
        FetchError::Network { message }
    }
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidUrl { .. } | FetchError::Network { .. } => ErrorKind::Network,
            FetchError::Http { status, .. } => ErrorKind::Http(*status),
            FetchError::Parse(_) => ErrorKind::Parse,
            FetchError::Application { .. } => ErrorKind::Application,
        }
    }
}

/// Coarse failure category, kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Http(u16),
    Parse,
    Application,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network_failure",
            ErrorKind::Http(_) => "http_error",
            ErrorKind::Parse => "parse_failure",
            ErrorKind::Application => "application_error",
        }
    }
}

/// Settled failure as stored in view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&FetchError> for FetchFailure {
    fn from(err: &FetchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<FetchError> for FetchFailure {
    fn from(err: FetchError) -> Self {
        Self::from(&err)
    }
}

const GENERIC_APPLICATION_ERROR: &str = "The server reported an error";

/// Detect an application-level error marker in a JSON body.
///
/// A body is flagged when it is an object whose `status` is one of the
/// strings `error`, `fail`, `failed`, `failure` (any case), the boolean
/// `false`, or an integer of 400 or more. Returns the message to surface.
pub fn application_error(body: &Value) -> Option<String> {
    let object = body.as_object()?;
    let status = object.get("status")?;

    let flagged = match status {
        Value::String(s) => matches!(
            s.to_ascii_lowercase().as_str(),
            "error" | "fail" | "failed" | "failure"
        ),
        Value::Bool(ok) => !ok,
        Value::Number(n) => n.as_u64().is_some_and(|code| code >= 400),
        _ => false,
    };

    if !flagged {
        return None;
    }

    let message = ["message", "error"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(GENERIC_APPLICATION_ERROR);

    Some(message.to_string())
}

/// Pull a human-readable message out of an error response body.
pub(crate) fn body_message(bytes: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(bytes).ok()?;
    let object = value.as_object()?;
    ["message", "error"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
