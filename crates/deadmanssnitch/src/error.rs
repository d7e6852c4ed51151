//! Error types for Dead Man's Snitch operations.
//!
//! Every failure is a tagged variant, decided at the point where it occurs.
//! HTTP failures carry the full request/response context so callers can
//! report them without re-inspecting the error shape.

use serde::Serialize;
use std::collections::BTreeMap;

/// Result type alias for Dead Man's Snitch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Echo of an outbound request, attached to HTTP failures.
///
/// The Authorization header is redacted before the echo is built; the API
/// key never appears in errors, reports, or logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEcho {
    /// HTTP method.
    pub method: String,
    /// Full request URL, including query string.
    pub url: String,
    /// Headers sent with the request (credentials redacted).
    pub headers: BTreeMap<String, String>,
    /// JSON body, if one was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

/// Body of an error response.
///
/// The upstream usually answers with JSON, but that is not guaranteed; a
/// body that fails to decode is kept as raw text instead of producing a
/// secondary decode failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Body decoded as JSON.
    Json(serde_json::Value),
    /// Body kept as raw text (not valid JSON).
    Text(String),
    /// No body.
    Empty,
}

impl ResponseBody {
    /// Classify a raw response body.
    #[must_use]
    pub fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }
}

/// Errors that can occur while talking to or reconciling against the API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The upstream answered with a non-2xx status.
    #[error("HTTP error: {status} {reason}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Reason phrase for the status.
        reason: String,
        /// Echo of the request that failed.
        request: RequestEcho,
        /// Response body, decoded when possible.
        body: ResponseBody,
    },

    /// The request never produced a status (connect, TLS, IO, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// A 2xx response carried a body we could not decode.
    #[error("invalid API response: {0}")]
    InvalidResponse(String),

    /// A snitch reference did not resolve to a live snitch.
    #[error("unable to find snitch with {field} {value}")]
    SnitchNotFound {
        /// Reference field that was searched ("id" or "name").
        field: &'static str,
        /// Value that was searched for.
        value: String,
    },

    /// Neither an id nor a name was supplied.
    #[error("either an id or a name is required to locate a snitch")]
    MissingReference,

    /// A field required for snitch creation was absent or empty.
    #[error("{field} is required when creating a new snitch")]
    MissingCreateField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}
