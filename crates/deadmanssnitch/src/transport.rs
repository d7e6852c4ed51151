//! HTTP transport for the Dead Man's Snitch API.
//!
//! A [`Transport`] is an explicitly constructed client owning its own
//! [`ureq::Agent`]; there is no process-wide session state. It issues one
//! synchronous request at a time and turns every non-2xx response into
//! [`Error::Http`] with the full request/response context attached.

use crate::error::{Error, RequestEcho, ResponseBody, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::collections::BTreeMap;

/// Production API base URL.
const DEFAULT_BASE_URL: &str = "https://api.deadmanssnitch.com/v1";

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PATCH request.
    Patch,
    /// DELETE request.
    Delete,
}

impl Method {
    /// Method name on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Synchronous HTTP transport with basic auth.
///
/// Authentication uses the API key as the basic-auth username with an
/// empty password, per the upstream's scheme.
pub struct Transport {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl Transport {
    /// Create a transport against the production API.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Create a transport with a custom base URL (for testing).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        // Statuses are handled here, not turned into ureq errors, so error
        // responses keep their bodies.
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// The base URL this transport talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request and decode the response.
    ///
    /// Null-valued top-level fields are stripped from JSON object bodies
    /// before sending. Returns `None` for 2xx responses with an empty body.
    ///
    /// # Errors
    ///
    /// `Error::Http` for non-2xx statuses, `Error::Transport` when no status
    /// was produced, `Error::InvalidResponse` when a 2xx body fails to parse.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        query: &[(&str, String)],
    ) -> Result<Option<serde_json::Value>> {
        let url = self.format_url(path, query);
        let mut body = body;
        if let Some(value) = body.as_mut() {
            strip_nulls(value);
        }

        let echo = RequestEcho {
            method: method.as_str().to_string(),
            url: url.clone(),
            headers: echo_headers(body.is_some()),
            body: body.clone(),
        };

        log::debug!("{} {}", method.as_str(), url);
        let auth = self.auth_header();
        let response = match method {
            Method::Get => self.agent.get(&url).header("Authorization", &auth).call(),
            Method::Delete => self
                .agent
                .delete(&url)
                .header("Authorization", &auth)
                .call(),
            Method::Post => {
                let request = self.agent.post(&url).header("Authorization", &auth);
                match body {
                    Some(json) => request.send_json(json),
                    None => request.send_empty(),
                }
            }
            Method::Patch => {
                let request = self.agent.patch(&url).header("Authorization", &auth);
                match body {
                    Some(json) => request.send_json(json),
                    None => request.send_empty(),
                }
            }
        };

        let mut response = response?;
        let status = response.status();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|err| Error::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
                request: echo,
                body: ResponseBody::from_text(text),
            });
        }

        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn format_url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}/{}", self.base_url, path);
        if !query.is_empty() {
            let pairs: Vec<String> = query
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        url
    }

    fn auth_header(&self) -> String {
        // API key as username, empty password.
        format!("Basic {}", BASE64.encode(format!("{}:", self.api_key)))
    }
}

/// Headers as echoed into error reports. The real Authorization value is
/// never included.
fn echo_headers(has_body: bool) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Authorization".to_string(), "Basic [redacted]".to_string());
    if has_body {
        headers.insert("Content-Type".to_string(), "application/json".to_string());
    }
    headers
}

/// Drop null-valued top-level fields from a JSON object body.
fn strip_nulls(value: &mut serde_json::Value) {
    if let serde_json::Value::Object(map) = value {
        map.retain(|_, field| !field.is_null());
    }
}
