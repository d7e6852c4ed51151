//! Typed operations over the snitch API.
//!
//! [`SnitchApi`] is the seam between the reconciler and the wire. The
//! production implementation is [`http::HttpApi`]; [`MockApi`] is an
//! in-memory stand-in that records every call so tests can assert exactly
//! which requests an operation issued.

pub mod http;

pub use http::HttpApi;

use crate::error::{Error, Result};
use crate::types::{Snitch, SnitchFields};
use std::sync::Mutex;

/// Operations the API exposes, one HTTP call each.
pub trait SnitchApi: Send + Sync {
    /// List all snitches, optionally filtered by tags (comma-joined query).
    fn list_snitches(&self, tags: &[String]) -> Result<Vec<Snitch>>;

    /// Point lookup by token. A missing snitch is `Ok(None)`, not an error.
    fn get_snitch(&self, token: &str) -> Result<Option<Snitch>>;

    /// Create a snitch from exactly the provided fields.
    fn create_snitch(&self, fields: &SnitchFields) -> Result<Snitch>;

    /// Partially update a snitch; absent fields are not sent.
    fn update_snitch(&self, token: &str, fields: &SnitchFields) -> Result<Snitch>;

    /// Delete a snitch.
    fn delete_snitch(&self, token: &str) -> Result<()>;

    /// Pause alerting for a snitch.
    fn pause_snitch(&self, token: &str) -> Result<()>;

    /// Resume alerting for a snitch.
    fn unpause_snitch(&self, token: &str) -> Result<()>;

    /// Append tags to a snitch (bare JSON list on the wire).
    fn append_tags(&self, token: &str, tags: &[String]) -> Result<()>;

    /// Replace all tags on a snitch.
    fn replace_tags(&self, token: &str, tags: &[String]) -> Result<()>;

    /// Remove a single tag from a snitch.
    fn remove_tag(&self, token: &str, tag: &str) -> Result<()>;
}

/// A recorded API call, for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    /// `list_snitches` with the given tag filter.
    List {
        /// Tag filter, empty for no filter.
        tags: Vec<String>,
    },
    /// `get_snitch`.
    Get {
        /// Token looked up.
        token: String,
    },
    /// `create_snitch`.
    Create {
        /// Fields sent.
        fields: SnitchFields,
    },
    /// `update_snitch`.
    Update {
        /// Token updated.
        token: String,
        /// Fields sent.
        fields: SnitchFields,
    },
    /// `delete_snitch`.
    Delete {
        /// Token deleted.
        token: String,
    },
    /// `pause_snitch`.
    Pause {
        /// Token paused.
        token: String,
    },
    /// `unpause_snitch`.
    Unpause {
        /// Token unpaused.
        token: String,
    },
    /// `append_tags`.
    AppendTags {
        /// Token modified.
        token: String,
        /// Tags appended.
        tags: Vec<String>,
    },
    /// `replace_tags`.
    ReplaceTags {
        /// Token modified.
        token: String,
        /// Replacement tag list.
        tags: Vec<String>,
    },
    /// `remove_tag`.
    RemoveTag {
        /// Token modified.
        token: String,
        /// Tag removed.
        tag: String,
    },
}

impl ApiCall {
    /// Whether this call mutates upstream state.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::List { .. } | Self::Get { .. })
    }
}

/// In-memory API for testing without network access.
///
/// Stores snitches in listing order and records every call made against it.
#[derive(Debug, Default)]
pub struct MockApi {
    snitches: Mutex<Vec<Snitch>>,
    calls: Mutex<Vec<ApiCall>>,
    next_token: Mutex<u64>,
}

impl MockApi {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock pre-seeded with snitches, in listing order.
    #[must_use]
    pub fn with_snitches(snitches: Vec<Snitch>) -> Self {
        Self {
            snitches: Mutex::new(snitches),
            ..Self::default()
        }
    }

    /// Append a snitch to the listing.
    pub fn add_snitch(&self, snitch: Snitch) {
        self.snitches.lock().unwrap().push(snitch);
    }

    /// All calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the mutating calls made so far.
    #[must_use]
    pub fn mutating_calls(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(ApiCall::is_mutating)
            .collect()
    }

    /// Current state of a stored snitch.
    #[must_use]
    pub fn snitch(&self, token: &str) -> Option<Snitch> {
        self.snitches
            .lock()
            .unwrap()
            .iter()
            .find(|snitch| snitch.token == token)
            .cloned()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn missing(token: &str) -> Error {
        Error::Other(format!("mock has no snitch with token {token}"))
    }
}

impl SnitchApi for MockApi {
    fn list_snitches(&self, tags: &[String]) -> Result<Vec<Snitch>> {
        self.record(ApiCall::List {
            tags: tags.to_vec(),
        });
        let snitches = self.snitches.lock().unwrap();
        Ok(snitches
            .iter()
            .filter(|snitch| tags.iter().all(|tag| snitch.tags.contains(tag)))
            .cloned()
            .collect())
    }

    fn get_snitch(&self, token: &str) -> Result<Option<Snitch>> {
        self.record(ApiCall::Get {
            token: token.to_string(),
        });
        Ok(self.snitch(token))
    }

    fn create_snitch(&self, fields: &SnitchFields) -> Result<Snitch> {
        self.record(ApiCall::Create {
            fields: fields.clone(),
        });
        let name = fields
            .name
            .clone()
            .ok_or_else(|| Error::Other("mock create requires a name".to_string()))?;
        let interval = fields
            .interval
            .ok_or_else(|| Error::Other("mock create requires an interval".to_string()))?;

        let mut next = self.next_token.lock().unwrap();
        *next += 1;
        let snitch = Snitch {
            token: format!("mock{next}"),
            name,
            interval,
            alert_type: fields.alert_type,
            alert_email: fields.alert_email.clone(),
            notes: fields.notes.clone(),
            tags: fields.tags.clone().unwrap_or_default(),
            status: Some("pending".to_string()),
            check_in_url: None,
            created_at: None,
        };
        self.snitches.lock().unwrap().push(snitch.clone());
        Ok(snitch)
    }

    fn update_snitch(&self, token: &str, fields: &SnitchFields) -> Result<Snitch> {
        self.record(ApiCall::Update {
            token: token.to_string(),
            fields: fields.clone(),
        });
        let mut snitches = self.snitches.lock().unwrap();
        let snitch = snitches
            .iter_mut()
            .find(|snitch| snitch.token == token)
            .ok_or_else(|| Self::missing(token))?;

        if let Some(name) = &fields.name {
            snitch.name = name.clone();
        }
        if let Some(interval) = fields.interval {
            snitch.interval = interval;
        }
        if let Some(alert_type) = fields.alert_type {
            snitch.alert_type = Some(alert_type);
        }
        if let Some(emails) = &fields.alert_email {
            snitch.alert_email = Some(emails.clone());
        }
        if let Some(notes) = &fields.notes {
            snitch.notes = Some(notes.clone());
        }
        if let Some(tags) = &fields.tags {
            snitch.tags = tags.clone();
        }
        Ok(snitch.clone())
    }

    fn delete_snitch(&self, token: &str) -> Result<()> {
        self.record(ApiCall::Delete {
            token: token.to_string(),
        });
        let mut snitches = self.snitches.lock().unwrap();
        let before = snitches.len();
        snitches.retain(|snitch| snitch.token != token);
        if snitches.len() == before {
            return Err(Self::missing(token));
        }
        Ok(())
    }

    fn pause_snitch(&self, token: &str) -> Result<()> {
        self.record(ApiCall::Pause {
            token: token.to_string(),
        });
        let mut snitches = self.snitches.lock().unwrap();
        let snitch = snitches
            .iter_mut()
            .find(|snitch| snitch.token == token)
            .ok_or_else(|| Self::missing(token))?;
        snitch.status = Some("paused".to_string());
        Ok(())
    }

    fn unpause_snitch(&self, token: &str) -> Result<()> {
        self.record(ApiCall::Unpause {
            token: token.to_string(),
        });
        let mut snitches = self.snitches.lock().unwrap();
        let snitch = snitches
            .iter_mut()
            .find(|snitch| snitch.token == token)
            .ok_or_else(|| Self::missing(token))?;
        snitch.status = Some("healthy".to_string());
        Ok(())
    }

    fn append_tags(&self, token: &str, tags: &[String]) -> Result<()> {
        self.record(ApiCall::AppendTags {
            token: token.to_string(),
            tags: tags.to_vec(),
        });
        let mut snitches = self.snitches.lock().unwrap();
        let snitch = snitches
            .iter_mut()
            .find(|snitch| snitch.token == token)
            .ok_or_else(|| Self::missing(token))?;
        for tag in tags {
            if !snitch.tags.contains(tag) {
                snitch.tags.push(tag.clone());
            }
        }
        Ok(())
    }

    fn replace_tags(&self, token: &str, tags: &[String]) -> Result<()> {
        self.record(ApiCall::ReplaceTags {
            token: token.to_string(),
            tags: tags.to_vec(),
        });
        let mut snitches = self.snitches.lock().unwrap();
        let snitch = snitches
            .iter_mut()
            .find(|snitch| snitch.token == token)
            .ok_or_else(|| Self::missing(token))?;
        snitch.tags = tags.to_vec();
        Ok(())
    }

    fn remove_tag(&self, token: &str, tag: &str) -> Result<()> {
        self.record(ApiCall::RemoveTag {
            token: token.to_string(),
            tag: tag.to_string(),
        });
        let mut snitches = self.snitches.lock().unwrap();
        let snitch = snitches
            .iter_mut()
            .find(|snitch| snitch.token == token)
            .ok_or_else(|| Self::missing(token))?;
        snitch.tags.retain(|existing| existing != tag);
        Ok(())
    }
}

/// Snitch value for seeding mocks in tests.
#[must_use]
pub fn sample_snitch(token: &str, name: &str) -> Snitch {
    Snitch {
        token: token.to_string(),
        name: name.to_string(),
        interval: crate::types::Interval::Hourly,
        alert_type: None,
        alert_email: None,
        notes: None,
        tags: Vec::new(),
        status: Some("healthy".to_string()),
        check_in_url: None,
        created_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Interval;

    #[test]
    fn test_mock_records_calls_in_order() {
        let mock = MockApi::new();
        mock.list_snitches(&[]).unwrap();
        mock.get_snitch("abc").unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ApiCall::List { tags: vec![] });
        assert!(mock.mutating_calls().is_empty());
    }

    #[test]
    fn test_mock_create_assigns_token() {
        let mock = MockApi::new();
        let fields = SnitchFields {
            name: Some("job".to_string()),
            interval: Some(Interval::Daily),
            ..Default::default()
        };
        let snitch = mock.create_snitch(&fields).unwrap();
        assert_eq!(snitch.token, "mock1");
        assert_eq!(mock.snitch("mock1").unwrap().name, "job");
    }

    #[test]
    fn test_mock_list_filters_by_tags() {
        let mut tagged = sample_snitch("a", "one");
        tagged.tags = vec!["prod".to_string(), "db".to_string()];
        let mock = MockApi::with_snitches(vec![tagged, sample_snitch("b", "two")]);

        let matches = mock.list_snitches(&["prod".to_string()]).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].token, "a");
    }

    #[test]
    fn test_mock_update_applies_only_set_fields() {
        let mock = MockApi::with_snitches(vec![sample_snitch("a", "one")]);
        let fields = SnitchFields {
            notes: Some("new notes".to_string()),
            ..Default::default()
        };
        let updated = mock.update_snitch("a", &fields).unwrap();
        assert_eq!(updated.name, "one");
        assert_eq!(updated.notes.as_deref(), Some("new notes"));
    }

    #[test]
    fn test_mock_tag_operations() {
        let mock = MockApi::with_snitches(vec![sample_snitch("a", "one")]);
        mock.append_tags("a", &["x".to_string(), "y".to_string()])
            .unwrap();
        mock.remove_tag("a", "x").unwrap();
        assert_eq!(mock.snitch("a").unwrap().tags, vec!["y"]);

        mock.replace_tags("a", &["z".to_string()]).unwrap();
        assert_eq!(mock.snitch("a").unwrap().tags, vec!["z"]);
    }

    #[test]
    fn test_mock_delete_missing_errors() {
        let mock = MockApi::new();
        assert!(mock.delete_snitch("nope").is_err());
    }
}
