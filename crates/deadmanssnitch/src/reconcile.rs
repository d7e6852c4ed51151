//! Desired-state reconciliation.
//!
//! Given a desired state and whatever is live upstream, compute the minimal
//! set of calls that converges them, issue those calls, and report whether
//! anything changed. Nothing is retried: a transport failure aborts the
//! operation, and a failure partway through a multi-call tag removal leaves
//! the snitch in whatever state the already-issued calls produced.

use crate::api::SnitchApi;
use crate::error::{Error, Result};
use crate::lookup::{self, SnitchRef};
use crate::types::{DesiredState, SnitchHandle, SnitchSpec, TagState, tag_set};
use serde::Serialize;

/// Result of a snitch lifecycle reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// Whether any upstream call was made.
    pub changed: bool,
    /// Identity of the affected snitch.
    pub snitch: SnitchHandle,
}

/// Result of a tag reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagOutcome {
    /// Whether any upstream call was made.
    pub changed: bool,
    /// Identity of the affected snitch.
    pub snitch: SnitchHandle,
    /// Tags on the snitch before the operation, in upstream order.
    pub old_tags: Vec<String>,
    /// Tags on the snitch after the operation, sorted.
    pub new_tags: Vec<String>,
}

/// Converge a snitch to the desired lifecycle state.
///
/// - present, no live match: create from exactly the provided fields
/// - present, live match: one partial update when any provided field differs
/// - absent, no live match: no-op
/// - absent, live match: delete
///
/// # Errors
///
/// `Error::MissingCreateField` when creating without a name or interval
/// (checked before any mutating call); lookup and transport failures
/// propagate unchanged.
pub fn ensure_snitch(
    api: &dyn SnitchApi,
    spec: &SnitchSpec,
    state: DesiredState,
) -> Result<Outcome> {
    let reference = SnitchRef {
        id: spec.id.clone(),
        name: spec.name.clone(),
    };
    let live = lookup::resolve(api, &reference)?;

    match (state, live) {
        (DesiredState::Present, Some(live)) => {
            if spec.differs_from(&live) {
                log::info!("snitch {} already exists, updating", live.token);
                let updated = api.update_snitch(&live.token, &spec.fields())?;
                Ok(Outcome {
                    changed: true,
                    snitch: SnitchHandle::of(&updated),
                })
            } else {
                log::debug!("snitch {} matches desired state", live.token);
                Ok(Outcome {
                    changed: false,
                    snitch: SnitchHandle::of(&live),
                })
            }
        }
        (DesiredState::Present, None) => {
            require_create_fields(spec)?;
            let created = api.create_snitch(&spec.fields())?;
            log::info!("created snitch {}", created.token);
            Ok(Outcome {
                changed: true,
                snitch: SnitchHandle::of(&created),
            })
        }
        (DesiredState::Absent, Some(live)) => {
            api.delete_snitch(&live.token)?;
            log::info!("deleted snitch {}", live.token);
            Ok(Outcome {
                changed: true,
                snitch: SnitchHandle::of(&live),
            })
        }
        (DesiredState::Absent, None) => Ok(Outcome {
            changed: false,
            snitch: SnitchHandle {
                id: spec.id.clone(),
                name: spec.name.clone(),
            },
        }),
    }
}

fn require_create_fields(spec: &SnitchSpec) -> Result<()> {
    if spec.name.as_deref().is_none_or(str::is_empty) {
        return Err(Error::MissingCreateField { field: "name" });
    }
    if spec.interval.is_none() {
        return Err(Error::MissingCreateField { field: "interval" });
    }
    Ok(())
}

/// Converge a snitch's tag set to the desired state.
///
/// The target snitch must already exist; resolution failure is reported
/// before any mutation, naming the reference field and value searched.
/// Resulting tag sets are computed locally from set algebra, not read back
/// from the upstream.
///
/// # Errors
///
/// `Error::SnitchNotFound` when the reference does not resolve; transport
/// failures propagate unchanged.
pub fn reconcile_tags(
    api: &dyn SnitchApi,
    reference: &SnitchRef,
    tags: &[String],
    state: TagState,
) -> Result<TagOutcome> {
    let live = lookup::resolve(api, reference)?.ok_or_else(|| reference.not_found())?;
    let live_set = tag_set(&live.tags);
    let desired_set = tag_set(tags);
    let old_tags = live.tags.clone();
    let snitch = SnitchHandle::of(&live);

    let (changed, new_tags) = match state {
        TagState::Present => {
            let to_add: Vec<String> = desired_set
                .difference(&live_set)
                .map(ToString::to_string)
                .collect();
            if to_add.is_empty() {
                (false, to_sorted_vec(live_set))
            } else {
                api.append_tags(&live.token, &to_add)?;
                let union: Vec<String> = desired_set
                    .union(&live_set)
                    .map(ToString::to_string)
                    .collect();
                (true, union)
            }
        }
        TagState::Absent => {
            let to_remove: Vec<String> = desired_set
                .intersection(&live_set)
                .map(ToString::to_string)
                .collect();
            if to_remove.is_empty() {
                (false, to_sorted_vec(live_set))
            } else {
                // Removal is per-tag on the wire, not batched.
                for tag in &to_remove {
                    api.remove_tag(&live.token, tag)?;
                }
                let remaining: Vec<String> = live_set
                    .difference(&desired_set)
                    .map(ToString::to_string)
                    .collect();
                (true, remaining)
            }
        }
        TagState::Absolute => {
            if desired_set == live_set {
                (false, to_sorted_vec(live_set))
            } else {
                let replacement = to_sorted_vec(desired_set);
                api.replace_tags(&live.token, &replacement)?;
                (true, replacement)
            }
        }
    };

    if changed {
        log::info!("reconciled tags on snitch {}", live.token);
    }
    Ok(TagOutcome {
        changed,
        snitch,
        old_tags,
        new_tags,
    })
}

fn to_sorted_vec(set: std::collections::BTreeSet<&str>) -> Vec<String> {
    set.into_iter().map(ToString::to_string).collect()
}
