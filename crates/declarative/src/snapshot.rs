//! Observed and desired snapshots

use crate::error::Result;
use crate::resource::{Document, ResourceDescriptor};
use crate::types::{Readiness, WaitReason};
use serde_json::Value;
use std::collections::BTreeMap;

/// Last known state of composed resources, as handed in by the host
///
/// Read-only for the lifetime of an evaluation.
#[derive(Debug, Clone, Default)]
pub struct ObservedSnapshot {
    resources: BTreeMap<String, ResourceDescriptor>,
}

impl ObservedSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every observed document, failing on the first bad one
    ///
    /// `annotation` names the annotation external identifiers are read from.
    pub fn decode<'a, I>(documents: I, annotation: &str) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        let mut resources = BTreeMap::new();
        for (key, value) in documents {
            let descriptor = ResourceDescriptor::decode(key, value, annotation)?;
            resources.insert(key.clone(), descriptor);
        }
        Ok(Self { resources })
    }

    /// Add an already-decoded descriptor
    pub fn insert(&mut self, descriptor: ResourceDescriptor) {
        self.resources.insert(descriptor.key.clone(), descriptor);
    }

    /// Look up an observed resource
    pub fn get(&self, key: &str) -> Option<&ResourceDescriptor> {
        self.resources.get(key)
    }

    /// Check if a resource has been observed
    pub fn contains(&self, key: &str) -> bool {
        self.resources.contains_key(key)
    }

    /// Readiness of `key` as seen by resources that depend on it
    ///
    /// Existing without an external name is not ready.
    pub fn readiness(&self, key: &str) -> Readiness {
        match self.resources.get(key) {
            None => Readiness::Waiting(WaitReason::NotCreated),
            Some(r) => match &r.external_name {
                Some(name) => Readiness::Ready(name.clone()),
                None => Readiness::Waiting(WaitReason::PendingIdentifier),
            },
        }
    }

    /// Observed logical keys, in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Number of observed resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if nothing has been observed
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// This invocation's computed next state, keyed by logical key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesiredSnapshot {
    resources: BTreeMap<String, ResourceDescriptor>,
}

impl DesiredSnapshot {
    /// Look up a desired resource
    pub fn get(&self, key: &str) -> Option<&ResourceDescriptor> {
        self.resources.get(key)
    }

    /// Check if a resource is desired
    pub fn contains(&self, key: &str) -> bool {
        self.resources.contains_key(key)
    }

    /// Desired logical keys, in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Iterate over desired resources in key order
    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.resources.values()
    }

    /// Encode every resource into the host's document shape
    pub fn to_documents(&self) -> BTreeMap<String, Document> {
        self.resources
            .iter()
            .map(|(key, r)| (key.clone(), r.to_document()))
            .collect()
    }

    /// Number of desired resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if nothing is desired
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl FromIterator<ResourceDescriptor> for DesiredSnapshot {
    fn from_iter<T: IntoIterator<Item = ResourceDescriptor>>(iter: T) -> Self {
        Self {
            resources: iter.into_iter().map(|r| (r.key.clone(), r)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ANNOTATION: &str = "crossplane.io/external-name";

    fn documents() -> BTreeMap<String, Value> {
        let mut docs = BTreeMap::new();
        docs.insert(
            "rg".to_string(),
            json!({
                "apiVersion": "azure.upbound.io/v1beta1",
                "kind": "ResourceGroup",
                "metadata": { "annotations": { "crossplane.io/external-name": "super-group" } }
            }),
        );
        docs.insert(
            "acct".to_string(),
            json!({
                "apiVersion": "storage.azure.upbound.io/v1beta1",
                "kind": "Account"
            }),
        );
        docs
    }

    #[test]
    fn test_readiness() {
        let snapshot = ObservedSnapshot::decode(&documents(), ANNOTATION).unwrap();

        assert_eq!(
            snapshot.readiness("rg"),
            Readiness::Ready("super-group".to_string())
        );
        assert_eq!(
            snapshot.readiness("acct"),
            Readiness::Waiting(WaitReason::PendingIdentifier)
        );
        assert_eq!(
            snapshot.readiness("cont"),
            Readiness::Waiting(WaitReason::NotCreated)
        );
    }

    #[test]
    fn test_decode_fails_on_bad_document() {
        let mut docs = documents();
        docs.insert("cont".to_string(), json!("not an object"));

        assert!(ObservedSnapshot::decode(&docs, ANNOTATION).is_err());
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = ObservedSnapshot::new();
        assert!(snapshot.is_empty());
        assert!(!snapshot.contains("rg"));
        assert!(!snapshot.readiness("rg").is_ready());
    }

    #[test]
    fn test_desired_from_iter_is_key_ordered() {
        let desired: DesiredSnapshot = ["rg", "acct", "cont"]
            .into_iter()
            .map(|key| ResourceDescriptor::new(key, "example.org/v1", "Thing"))
            .collect();

        let keys: Vec<&str> = desired.keys().collect();
        assert_eq!(keys, vec!["acct", "cont", "rg"]);
        assert_eq!(desired.to_documents().len(), 3);
    }
}
