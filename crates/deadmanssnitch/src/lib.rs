//! # deadmanssnitch
//!
//! Synchronous client and reconciler for the Dead Man's Snitch monitoring
//! API (heartbeat-style dead-man's-switch monitors, "snitches").
//!
//! The crate is built around desired-state reconciliation: callers describe
//! what a snitch should look like, and the library computes and issues the
//! minimal set of API calls to get there, reporting whether anything
//! changed. Every invocation owns its own HTTP client; there is no shared
//! process-wide session state.
//!
//! ## Example
//!
//! ```no_run
//! use deadmanssnitch::{Client, DesiredState, Interval, SnitchSpec};
//!
//! let client = Client::new("my-api-key");
//!
//! let spec = SnitchSpec {
//!     name: Some("nightly-backups".to_string()),
//!     interval: Some(Interval::Daily),
//!     ..Default::default()
//! };
//!
//! let outcome = client.ensure(&spec, DesiredState::Present).unwrap();
//! println!("changed: {}", outcome.changed);
//! ```
//!
//! ## Testing
//!
//! [`MockApi`] implements [`SnitchApi`] in memory and records every call,
//! so reconciliation logic can be exercised without network access.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod error;
pub mod lookup;
pub mod reconcile;
pub mod report;
pub mod transport;
pub mod types;

pub use api::{ApiCall, HttpApi, MockApi, SnitchApi};
pub use error::{Error, RequestEcho, ResponseBody, Result};
pub use lookup::{SnitchQuery, SnitchRef};
pub use reconcile::{Outcome, TagOutcome};
pub use report::{FailureReport, SearchedRef};
pub use transport::Transport;
pub use types::{
    AlertType, DesiredState, Interval, Snitch, SnitchFields, SnitchHandle, SnitchSpec, TagState,
};

/// High-level client over the snitch API.
///
/// Owns its API implementation; construct one per invocation.
pub struct Client {
    api: Box<dyn SnitchApi>,
}

impl Client {
    /// Create a client against the production API.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api: Box::new(HttpApi::new(Transport::new(api_key))),
        }
    }

    /// Create a client with a custom API implementation (useful for testing).
    #[must_use]
    pub fn with_api(api: Box<dyn SnitchApi>) -> Self {
        Self { api }
    }

    /// The underlying API.
    #[must_use]
    pub fn api(&self) -> &dyn SnitchApi {
        self.api.as_ref()
    }

    /// Converge a snitch to the desired lifecycle state.
    pub fn ensure(&self, spec: &SnitchSpec, state: DesiredState) -> Result<Outcome> {
        reconcile::ensure_snitch(self.api.as_ref(), spec, state)
    }

    /// Converge a snitch's tag set to the desired state.
    pub fn reconcile_tags(
        &self,
        reference: &SnitchRef,
        tags: &[String],
        state: TagState,
    ) -> Result<TagOutcome> {
        reconcile::reconcile_tags(self.api.as_ref(), reference, tags, state)
    }

    /// Resolve a reference to a live snitch, if one exists.
    pub fn resolve(&self, reference: &SnitchRef) -> Result<Option<Snitch>> {
        lookup::resolve(self.api.as_ref(), reference)
    }

    /// Look up snitches matching a query.
    pub fn find(&self, query: &SnitchQuery) -> Result<Vec<Snitch>> {
        lookup::find_snitches(self.api.as_ref(), query)
    }

    /// Pause alerting for a snitch.
    ///
    /// # Errors
    ///
    /// `Error::SnitchNotFound` when the reference does not resolve.
    pub fn pause(&self, reference: &SnitchRef) -> Result<SnitchHandle> {
        let live = self
            .resolve(reference)?
            .ok_or_else(|| reference.not_found())?;
        self.api.pause_snitch(&live.token)?;
        Ok(SnitchHandle::of(&live))
    }

    /// Resume alerting for a snitch.
    ///
    /// # Errors
    ///
    /// `Error::SnitchNotFound` when the reference does not resolve.
    pub fn unpause(&self, reference: &SnitchRef) -> Result<SnitchHandle> {
        let live = self
            .resolve(reference)?
            .ok_or_else(|| reference.not_found())?;
        self.api.unpause_snitch(&live.token)?;
        Ok(SnitchHandle::of(&live))
    }
}
