//! Uniform failure reports.
//!
//! Translates an [`Error`] into the structured shape surfaced to callers:
//! HTTP failures carry the status code, a request echo, and the decoded
//! response body; lookup failures name the reference that was searched;
//! everything else becomes a plain message. Translation never retries or
//! suppresses — it only shapes the failure for reporting.

use crate::error::{Error, RequestEcho, ResponseBody};
use serde::Serialize;

/// The reference field and value a failed lookup searched by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchedRef {
    /// Field used for the search ("id" or "name").
    pub param: &'static str,
    /// Value searched for.
    pub value: String,
}

/// Caller-facing failure report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureReport {
    /// Human-readable message; always present.
    pub msg: String,
    /// HTTP status code, for HTTP-backed failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Echo of the failed request, for HTTP-backed failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestEcho>,
    /// Response body, for HTTP-backed failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseBody>,
    /// What was searched, for resource-not-found failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searched: Option<SearchedRef>,
}

impl FailureReport {
    /// Translate an error into its report shape.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Http {
                status,
                reason,
                request,
                body,
            } => Self {
                msg: format!("HTTP error: {status} {reason}"),
                code: Some(*status),
                request: Some(request.clone()),
                response: Some(body.clone()),
                searched: None,
            },
            Error::SnitchNotFound { field, value } => Self {
                msg: format!("Unable to find snitch with {field} {value}"),
                code: None,
                request: None,
                response: None,
                searched: Some(SearchedRef {
                    param: field,
                    value: value.clone(),
                }),
            },
            other => Self {
                msg: format!("Error: {other}"),
                code: None,
                request: None,
                response: None,
                searched: None,
            },
        }
    }
}

impl From<&Error> for FailureReport {
    fn from(err: &Error) -> Self {
        Self::from_error(err)
    }
}
