//! Identifiers resolved during one evaluation
//!
//! The frontier is what a stage can see of the stages before it. It only
//! ever grows within one evaluation and is dropped when the evaluation ends.

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Where a resolved identifier came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Read from the observed snapshot; the resource exists
    Observed,
    /// Computed this evaluation from the intent; safe to use immediately
    Derived,
}

/// An identifier a later stage may depend on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub identifier: String,
    pub provenance: Provenance,
}

/// Identifiers resolved so far, keyed by stage
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    resolved: BTreeMap<String, Resolved>,
}

impl Frontier {
    /// Create an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an identifier for `key`
    ///
    /// An observed identifier wins over a derived one for the same key.
    pub fn resolve(&mut self, key: &str, identifier: impl Into<String>, provenance: Provenance) {
        if provenance == Provenance::Derived
            && self
                .resolved
                .get(key)
                .is_some_and(|r| r.provenance == Provenance::Observed)
        {
            return;
        }

        self.resolved.insert(
            key.to_string(),
            Resolved {
                identifier: identifier.into(),
                provenance,
            },
        );
    }

    /// Look up the identifier resolved for `key`
    pub fn get(&self, key: &str) -> Option<&Resolved> {
        self.resolved.get(key)
    }

    /// Get the identifier `stage` depends on, or fail if it isn't resolved
    pub fn require(&self, stage: &str, dependency: &str) -> Result<&str> {
        self.resolved
            .get(dependency)
            .map(|r| r.identifier.as_str())
            .ok_or_else(|| Error::UnresolvedDependency {
                stage: stage.to_string(),
                dependency: dependency.to_string(),
            })
    }

    /// Number of resolved identifiers
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Check if nothing has been resolved
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}
