//! Resource descriptors and the stage trait
//!
//! A [`ResourceDescriptor`] is one composed resource, either desired (built by
//! a [`Stage`] this invocation) or observed (decoded from the host's snapshot).
//! Both share the same shape and the same [`Document`] encoding.

use crate::context::Frontier;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Object metadata carried by a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Check if there is nothing worth encoding
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.annotations.is_empty()
    }
}

/// The generic structured document exchanged with the host
///
/// Only the fields composition cares about are typed; anything else an
/// observed resource carries (status, labels, uid) is ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub api_version: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "ObjectMeta::is_empty")]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub spec: Value,
}

/// A composed resource, keyed by its role in the dependency graph
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDescriptor {
    /// Stable identity within the graph (e.g. "rg", "acct", "cont")
    pub key: String,
    pub api_version: String,
    pub kind: String,
    /// Name the underlying system knows this resource by, once there is one
    pub external_name: Option<String>,
    pub annotations: BTreeMap<String, String>,
    pub spec: Value,
}

impl ResourceDescriptor {
    /// Create a descriptor with no spec and no annotations
    pub fn new(
        key: impl Into<String>,
        api_version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            api_version: api_version.into(),
            kind: kind.into(),
            external_name: None,
            annotations: BTreeMap::new(),
            spec: Value::Null,
        }
    }

    /// Set the spec from a typed, kind-specific structure
    pub fn with_spec<S: Serialize>(mut self, spec: &S) -> Result<Self> {
        self.spec = serde_json::to_value(spec).map_err(|source| Error::Encode {
            key: self.key.clone(),
            source,
        })?;
        Ok(self)
    }

    /// Pin the external name, recording it under `annotation`
    pub fn with_external_name(mut self, annotation: &str, name: impl Into<String>) -> Self {
        let name = name.into();
        self.annotations.insert(annotation.to_string(), name.clone());
        self.external_name = Some(name);
        self
    }

    /// Decode an observed resource document
    ///
    /// The external name is read from `annotation`; an empty value is treated
    /// the same as a missing one.
    pub fn decode(key: &str, value: &Value, annotation: &str) -> Result<Self> {
        let doc = Document::deserialize(value)
            .map_err(|e| Error::decode(format!("observed resource {key}"), e))?;

        let external_name = doc
            .metadata
            .annotations
            .get(annotation)
            .filter(|name| !name.is_empty())
            .cloned();

        Ok(Self {
            key: key.to_string(),
            api_version: doc.api_version,
            kind: doc.kind,
            external_name,
            annotations: doc.metadata.annotations,
            spec: doc.spec,
        })
    }

    /// Encode into the host's document shape
    pub fn to_document(&self) -> Document {
        Document {
            api_version: self.api_version.clone(),
            kind: self.kind.clone(),
            metadata: ObjectMeta {
                name: None,
                annotations: self.annotations.clone(),
            },
            spec: self.spec.clone(),
        }
    }
}

/// One resource kind in an ordered composition pipeline
///
/// Stages are evaluated in order. Each one builds its desired descriptor from
/// the intent and from identifiers resolved by earlier stages. A stage that
/// gates its dependents stops the pipeline until the host has observed it with
/// an external name.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug)]
/// struct Network;
///
/// impl Stage<Intent> for Network {
///     fn key(&self) -> &'static str { "net" }
///     fn description(&self) -> &'static str { "network" }
///     fn gates_dependents(&self) -> bool { true }
///
///     fn build(&self, intent: &Intent, _: &Frontier) -> Result<ResourceDescriptor> {
///         ResourceDescriptor::new("net", "example.org/v1", "Network")
///             .with_spec(&NetworkSpec { region: intent.region.clone() })
///     }
/// }
/// ```
pub trait Stage<I>: Send + Sync + fmt::Debug {
    /// Logical key, unique within the pipeline
    fn key(&self) -> &'static str;

    /// Human-readable name used in waiting messages (e.g. "resource group")
    fn description(&self) -> &'static str;

    /// Whether later stages need this one observed with an external name
    fn gates_dependents(&self) -> bool {
        false
    }

    /// Build this stage's desired descriptor
    fn build(&self, intent: &I, frontier: &Frontier) -> Result<ResourceDescriptor>;
}

/// A boxed stage for type-erased storage
pub type BoxedStage<I> = Box<dyn Stage<I>>;
