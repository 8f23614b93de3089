//! Intent model - the caller's declared storage bucket
//!
//! The composite resource is decoded against an explicit schema. Only the
//! fields composition reads are typed; other parameters are logged and left
//! alone so the composite's schema can grow without breaking composition.

use declarative::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Who may read blobs in the container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessLevel {
    #[default]
    Private,
    Public,
}

impl AccessLevel {
    /// Parse an `acl` parameter; only "public" opens the container
    pub fn from_acl(acl: Option<&str>) -> Self {
        match acl {
            Some("public") => AccessLevel::Public,
            _ => AccessLevel::Private,
        }
    }

    /// Container access type the storage provider expects
    pub fn container_access_type(self) -> &'static str {
        match self {
            AccessLevel::Public => "blob",
            AccessLevel::Private => "private",
        }
    }
}

/// The typed intent one invocation composes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    /// Name of the composite resource; downstream names derive from it
    pub logical_name: String,
    pub location: String,
    pub access_level: AccessLevel,
    pub versioning_enabled: bool,
}

impl Intent {
    /// Decode and validate the observed composite resource
    pub fn decode(value: &Value) -> Result<Self> {
        let xr = XStorageBucket::deserialize(value)
            .map_err(|e| Error::decode("composite resource", e))?;

        let params = xr.spec.parameters;
        if !params.unknown.is_empty() {
            let keys: Vec<&str> = params.unknown.keys().map(String::as_str).collect();
            log::warn!("Ignoring unknown parameters: {}", keys.join(", "));
        }

        let location = params.location.unwrap_or_default();
        if location.is_empty() {
            return Err(Error::validation(
                "spec.parameters.location",
                "missing location",
            ));
        }

        Ok(Self {
            logical_name: xr.metadata.name.unwrap_or_default(),
            location,
            access_level: AccessLevel::from_acl(params.acl.as_deref()),
            versioning_enabled: params.versioning.unwrap_or(false),
        })
    }
}

// ============================================================================
// XStorageBucket schema
// ============================================================================

#[derive(Debug, Deserialize)]
struct XStorageBucket {
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    spec: XStorageBucketSpec,
}

#[derive(Debug, Default, Deserialize)]
struct Metadata {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct XStorageBucketSpec {
    #[serde(default)]
    parameters: Parameters,
}

#[derive(Debug, Default, Deserialize)]
struct Parameters {
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    acl: Option<String>,
    #[serde(default)]
    versioning: Option<bool>,
    #[serde(flatten)]
    unknown: BTreeMap<String, Value>,
}
