//! Resolving snitch references to live snitches.
//!
//! A [`SnitchRef`] names a snitch by id or by name; id wins when both are
//! set. Name resolution scans the full listing in listing order and takes
//! the first exact match — duplicate names are silently ignored, so the
//! result is "first in listing order", not "unique" or "most recent".

use crate::api::SnitchApi;
use crate::error::{Error, Result};
use crate::types::Snitch;

/// Reference to a snitch by id or name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnitchRef {
    /// Upstream id (token). Takes precedence over `name`.
    pub id: Option<String>,
    /// Exact name.
    pub name: Option<String>,
}

impl SnitchRef {
    /// Reference by id.
    #[must_use]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
        }
    }

    /// Reference by exact name.
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// Which field and value resolution searched by, id first.
    #[must_use]
    pub fn searched(&self) -> Option<(&'static str, &str)> {
        if let Some(id) = self.id.as_deref() {
            return Some(("id", id));
        }
        self.name.as_deref().map(|name| ("name", name))
    }

    /// The failure for this reference not resolving.
    #[must_use]
    pub fn not_found(&self) -> Error {
        match self.searched() {
            Some((field, value)) => Error::SnitchNotFound {
                field,
                value: value.to_string(),
            },
            None => Error::MissingReference,
        }
    }
}

/// Resolve a reference to a live snitch, or `None` if nothing matches.
///
/// # Errors
///
/// `Error::MissingReference` when neither id nor name is set; transport
/// failures propagate unchanged.
pub fn resolve(api: &dyn SnitchApi, reference: &SnitchRef) -> Result<Option<Snitch>> {
    if let Some(id) = &reference.id {
        return api.get_snitch(id);
    }
    if let Some(name) = &reference.name {
        let snitches = api.list_snitches(&[])?;
        return Ok(snitches.into_iter().find(|snitch| snitch.name == *name));
    }
    Err(Error::MissingReference)
}

/// Selector for the info operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SnitchQuery {
    /// Exact name; at most one result (first match in listing order).
    ByName(String),
    /// Upstream id; at most one result.
    ById(String),
    /// All snitches carrying every one of these tags.
    ByTags(Vec<String>),
    /// Every snitch.
    All,
}

/// Look up snitches matching a query.
pub fn find_snitches(api: &dyn SnitchApi, query: &SnitchQuery) -> Result<Vec<Snitch>> {
    match query {
        SnitchQuery::ByName(name) => Ok(api
            .list_snitches(&[])?
            .into_iter()
            .find(|snitch| snitch.name == *name)
            .into_iter()
            .collect()),
        SnitchQuery::ById(id) => Ok(api.get_snitch(id)?.into_iter().collect()),
        SnitchQuery::ByTags(tags) => api.list_snitches(tags),
        SnitchQuery::All => api.list_snitches(&[]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockApi, sample_snitch};

    #[test]
    fn test_resolve_by_id() {
        let mock = MockApi::with_snitches(vec![sample_snitch("abc", "one")]);
        let snitch = resolve(&mock, &SnitchRef::by_id("abc")).unwrap().unwrap();
        assert_eq!(snitch.name, "one");
    }

    #[test]
    fn test_resolve_by_id_missing() {
        let mock = MockApi::new();
        assert!(resolve(&mock, &SnitchRef::by_id("nope")).unwrap().is_none());
    }

    #[test]
    fn test_resolve_id_takes_precedence() {
        let mock = MockApi::with_snitches(vec![
            sample_snitch("abc", "one"),
            sample_snitch("def", "two"),
        ]);
        let reference = SnitchRef {
            id: Some("def".to_string()),
            name: Some("one".to_string()),
        };
        let snitch = resolve(&mock, &reference).unwrap().unwrap();
        assert_eq!(snitch.token, "def");
    }

    #[test]
    fn test_resolve_by_name_first_match_wins() {
        // Two snitches sharing a name: the first in listing order is used,
        // the later duplicate is ignored.
        let mock = MockApi::with_snitches(vec![
            sample_snitch("first", "dup"),
            sample_snitch("second", "dup"),
        ]);
        let snitch = resolve(&mock, &SnitchRef::by_name("dup")).unwrap().unwrap();
        assert_eq!(snitch.token, "first");
    }

    #[test]
    fn test_resolve_by_name_exact_only() {
        let mock = MockApi::with_snitches(vec![sample_snitch("abc", "backup-job")]);
        assert!(resolve(&mock, &SnitchRef::by_name("backup")).unwrap().is_none());
    }

    #[test]
    fn test_resolve_without_reference_is_caller_error() {
        let mock = MockApi::new();
        let err = resolve(&mock, &SnitchRef::default()).unwrap_err();
        assert!(matches!(err, Error::MissingReference));
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn test_searched_prefers_id() {
        let reference = SnitchRef {
            id: Some("abc".to_string()),
            name: Some("one".to_string()),
        };
        assert_eq!(reference.searched(), Some(("id", "abc")));
        assert_eq!(SnitchRef::by_name("one").searched(), Some(("name", "one")));
        assert_eq!(SnitchRef::default().searched(), None);
    }

    #[test]
    fn test_find_by_name_returns_at_most_one() {
        let mock = MockApi::with_snitches(vec![
            sample_snitch("first", "dup"),
            sample_snitch("second", "dup"),
        ]);
        let found = find_snitches(&mock, &SnitchQuery::ByName("dup".to_string())).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].token, "first");
    }

    #[test]
    fn test_find_by_tags_passes_filter_to_listing() {
        let mock = MockApi::new();
        find_snitches(&mock, &SnitchQuery::ByTags(vec!["prod".to_string()])).unwrap();
        assert_eq!(
            mock.calls(),
            vec![crate::api::ApiCall::List {
                tags: vec!["prod".to_string()]
            }]
        );
    }

    #[test]
    fn test_find_all() {
        let mock = MockApi::with_snitches(vec![
            sample_snitch("a", "one"),
            sample_snitch("b", "two"),
        ]);
        let found = find_snitches(&mock, &SnitchQuery::All).unwrap();
        assert_eq!(found.len(), 2);
    }
}
