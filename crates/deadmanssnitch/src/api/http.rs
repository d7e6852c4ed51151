//! ureq-backed implementation of [`SnitchApi`].
//!
//! Each operation maps to exactly one HTTP call. Responses are decoded into
//! the typed models; a 404 on point lookup becomes `Ok(None)` so the caller
//! can treat "not found" as a state rather than a failure.

use crate::api::SnitchApi;
use crate::error::{Error, Result};
use crate::transport::{Method, Transport};
use crate::types::{Snitch, SnitchFields};
use serde_json::json;

/// HTTP implementation of the snitch API.
pub struct HttpApi {
    transport: Transport,
}

impl HttpApi {
    /// Wrap a transport.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

fn decode_snitch(value: Option<serde_json::Value>, context: &str) -> Result<Snitch> {
    let value =
        value.ok_or_else(|| Error::InvalidResponse(format!("empty body from {context}")))?;
    Ok(serde_json::from_value(value)?)
}

fn snitch_path(token: &str) -> String {
    format!("snitches/{token}")
}

fn tags_path(token: &str) -> String {
    format!("snitches/{token}/tags")
}

fn tag_path(token: &str, tag: &str) -> String {
    format!("snitches/{token}/tags/{tag}")
}

impl SnitchApi for HttpApi {
    fn list_snitches(&self, tags: &[String]) -> Result<Vec<Snitch>> {
        let mut query = Vec::new();
        if !tags.is_empty() {
            query.push(("tags", tags.join(",")));
        }
        match self.transport.request(Method::Get, "snitches", None, &query)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    fn get_snitch(&self, token: &str) -> Result<Option<Snitch>> {
        match self
            .transport
            .request(Method::Get, &snitch_path(token), None, &[])
        {
            Ok(Some(value)) => Ok(Some(serde_json::from_value(value)?)),
            Ok(None) => Ok(None),
            Err(Error::Http { status: 404, .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn create_snitch(&self, fields: &SnitchFields) -> Result<Snitch> {
        let body = serde_json::to_value(fields)?;
        let response = self
            .transport
            .request(Method::Post, "snitches", Some(body), &[])?;
        decode_snitch(response, "snitch create")
    }

    fn update_snitch(&self, token: &str, fields: &SnitchFields) -> Result<Snitch> {
        let body = serde_json::to_value(fields)?;
        let response =
            self.transport
                .request(Method::Patch, &snitch_path(token), Some(body), &[])?;
        decode_snitch(response, "snitch update")
    }

    fn delete_snitch(&self, token: &str) -> Result<()> {
        self.transport
            .request(Method::Delete, &snitch_path(token), None, &[])?;
        Ok(())
    }

    fn pause_snitch(&self, token: &str) -> Result<()> {
        let path = format!("snitches/{token}/pause");
        self.transport.request(Method::Post, &path, None, &[])?;
        Ok(())
    }

    fn unpause_snitch(&self, token: &str) -> Result<()> {
        let path = format!("snitches/{token}/unpause");
        self.transport.request(Method::Post, &path, None, &[])?;
        Ok(())
    }

    fn append_tags(&self, token: &str, tags: &[String]) -> Result<()> {
        // The append endpoint takes a bare list, not an object.
        self.transport
            .request(Method::Post, &tags_path(token), Some(json!(tags)), &[])?;
        Ok(())
    }

    fn replace_tags(&self, token: &str, tags: &[String]) -> Result<()> {
        self.transport.request(
            Method::Patch,
            &snitch_path(token),
            Some(json!({ "tags": tags })),
            &[],
        )?;
        Ok(())
    }

    fn remove_tag(&self, token: &str, tag: &str) -> Result<()> {
        self.transport
            .request(Method::Delete, &tag_path(token, tag), None, &[])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snitch_path() {
        assert_eq!(snitch_path("abc123"), "snitches/abc123");
    }

    #[test]
    fn test_tags_paths() {
        assert_eq!(tags_path("abc123"), "snitches/abc123/tags");
        assert_eq!(tag_path("abc123", "prod"), "snitches/abc123/tags/prod");
    }
}
