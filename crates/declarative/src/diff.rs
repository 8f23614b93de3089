//! Diff computation between observed and desired snapshots

use crate::snapshot::{DesiredSnapshot, ObservedSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a resource's desired state relates to what has been observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Change {
    /// Desired but not yet observed; the host will create it
    Create,
    /// Desired and already observed
    Observed,
    /// Observed but not desired this invocation
    Orphaned,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Create => write!(f, "create"),
            Change::Observed => write!(f, "observed"),
            Change::Orphaned => write!(f, "orphaned"),
        }
    }
}

/// A diff for one logical key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDiff {
    /// Logical key of the resource
    pub key: String,
    /// Kind of the resource
    pub kind: String,
    pub change: Change,
}

/// Compute diffs for every key in either snapshot
///
/// Desired keys come first, in key order, followed by orphaned keys.
pub fn compute_diffs(observed: &ObservedSnapshot, desired: &DesiredSnapshot) -> Vec<ResourceDiff> {
    let mut diffs: Vec<ResourceDiff> = desired
        .iter()
        .map(|r| ResourceDiff {
            key: r.key.clone(),
            kind: r.kind.clone(),
            change: if observed.contains(&r.key) {
                Change::Observed
            } else {
                Change::Create
            },
        })
        .collect();

    diffs.extend(
        observed
            .keys()
            .filter(|key| !desired.contains(key))
            .filter_map(|key| observed.get(key))
            .map(|r| ResourceDiff {
                key: r.key.clone(),
                kind: r.kind.clone(),
                change: Change::Orphaned,
            }),
    );

    diffs
}

/// Diff summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    /// Number of resources the host still has to create
    pub creates: usize,
    /// Number of desired resources already observed
    pub observed: usize,
    /// Number of observed resources no longer desired
    pub orphaned: usize,
}

impl DiffSummary {
    /// Create a summary from a list of diffs
    pub fn from_diffs(diffs: &[ResourceDiff]) -> Self {
        let mut summary = Self::default();
        for diff in diffs {
            match diff.change {
                Change::Create => summary.creates += 1,
                Change::Observed => summary.observed += 1,
                Change::Orphaned => summary.orphaned += 1,
            }
        }
        summary
    }

    /// Total number of keys considered
    pub fn total(&self) -> usize {
        self.creates + self.observed + self.orphaned
    }

    /// Check if the host has anything left to create
    pub fn has_creates(&self) -> bool {
        self.creates > 0
    }
}
