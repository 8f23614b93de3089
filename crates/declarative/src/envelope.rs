//! Request/response envelope exchanged with the host
//!
//! This is the JSON rendering of a composition function call: the host sends
//! the observed composite and composed resources, and gets back desired
//! composed resources plus results. Keys this crate doesn't use (`desired`,
//! `input`, `context` on the request) are accepted and ignored.

use crate::assembler::DesiredState;
use crate::resource::Document;
use crate::types::FunctionResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Default time the host may cache a response for
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Request metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMeta {
    #[serde(default)]
    pub tag: String,
}

/// A single resource as carried by the envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub resource: Value,
}

/// Observed composite and composed resources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite: Option<Resource>,
    #[serde(default)]
    pub resources: BTreeMap<String, Resource>,
}

impl ObservedState {
    /// Observed composed resource documents, keyed by logical key
    pub fn resource_documents(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.resources.iter().map(|(key, r)| (key, &r.resource))
    }
}

/// A function invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunFunctionRequest {
    #[serde(default)]
    pub meta: RequestMeta,
    #[serde(default)]
    pub observed: ObservedState,
}

/// Response metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub tag: String,
    /// Duration in protobuf JSON form, e.g. "60s"
    pub ttl: String,
}

/// Desired composed resources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesiredResources {
    #[serde(default)]
    pub resources: BTreeMap<String, Resource>,
}

/// A function response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFunctionResponse {
    pub meta: ResponseMeta,
    #[serde(default)]
    pub results: Vec<FunctionResult>,
    #[serde(default)]
    pub desired: DesiredResources,
}

impl RunFunctionResponse {
    /// Start a response to `req`, echoing its tag
    pub fn to(req: &RunFunctionRequest, ttl: Duration) -> Self {
        Self::with_tag(req.meta.tag.clone(), ttl)
    }

    /// Start a response for a request whose tag is already known
    pub fn with_tag(tag: impl Into<String>, ttl: Duration) -> Self {
        Self {
            meta: ResponseMeta {
                tag: tag.into(),
                ttl: format!("{}s", ttl.as_secs()),
            },
            results: Vec::new(),
            desired: DesiredResources::default(),
        }
    }

    /// Fail the invocation: one fatal result and nothing desired
    pub fn fatal(&mut self, message: impl Into<String>) {
        self.desired.resources.clear();
        self.results = vec![FunctionResult::fatal(message)];
    }

    /// Set desired resources and results from assembled state
    pub fn set_desired(&mut self, state: DesiredState) -> serde_json::Result<()> {
        let mut resources = BTreeMap::new();
        for (key, doc) in state.resources.to_documents() {
            resources.insert(key, encode(&doc)?);
        }
        self.desired.resources = resources;
        self.results.extend(state.results);
        Ok(())
    }

    /// Check if the response carries a fatal result
    pub fn is_fatal(&self) -> bool {
        self.results.iter().any(FunctionResult::is_fatal)
    }
}

fn encode(doc: &Document) -> serde_json::Result<Resource> {
    Ok(Resource {
        resource: serde_json::to_value(doc)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceDescriptor;
    use crate::types::Severity;
    use serde_json::json;

    #[test]
    fn test_request_decodes_host_shape() {
        let req: RunFunctionRequest = serde_json::from_value(json!({
            "meta": { "tag": "hello" },
            "observed": {
                "composite": { "resource": { "kind": "XStorageBucket" } },
                "resources": {
                    "rg": { "resource": { "kind": "ResourceGroup" } }
                }
            },
            "desired": {},
            "input": { "apiVersion": "example.org/v1" }
        }))
        .unwrap();

        assert_eq!(req.meta.tag, "hello");
        assert!(req.observed.composite.is_some());
        let docs: Vec<_> = req.observed.resource_documents().collect();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].0, "rg");
    }

    #[test]
    fn test_request_defaults() {
        let req: RunFunctionRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.meta.tag, "");
        assert!(req.observed.composite.is_none());
        assert!(req.observed.resources.is_empty());
    }

    #[test]
    fn test_response_echoes_tag_and_ttl() {
        let req = RunFunctionRequest {
            meta: RequestMeta {
                tag: "hello".to_string(),
            },
            ..Default::default()
        };
        let rsp = RunFunctionResponse::to(&req, DEFAULT_TTL);
        assert_eq!(rsp.meta.tag, "hello");
        assert_eq!(rsp.meta.ttl, "60s");
        assert!(rsp.results.is_empty());
    }

    #[test]
    fn test_fatal_clears_desired() {
        let mut rsp = RunFunctionResponse::with_tag("t", DEFAULT_TTL);
        let state = DesiredState {
            resources: vec![ResourceDescriptor::new("rg", "example.org/v1", "Thing")]
                .into_iter()
                .collect(),
            results: Vec::new(),
        };
        rsp.set_desired(state).unwrap();
        assert_eq!(rsp.desired.resources.len(), 1);

        rsp.fatal("missing location");
        assert!(rsp.desired.resources.is_empty());
        assert_eq!(rsp.results.len(), 1);
        assert_eq!(rsp.results[0].severity, Severity::Fatal);
        assert!(rsp.is_fatal());
    }

    #[test]
    fn test_response_wire_shape() {
        let mut rsp = RunFunctionResponse::with_tag("t", DEFAULT_TTL);
        let state = DesiredState {
            resources: vec![ResourceDescriptor::new("rg", "example.org/v1", "Thing")]
                .into_iter()
                .collect(),
            results: vec![FunctionResult::normal("waiting").target_composite_and_claim()],
        };
        rsp.set_desired(state).unwrap();

        let value = serde_json::to_value(&rsp).unwrap();
        assert_eq!(
            value,
            json!({
                "meta": { "tag": "t", "ttl": "60s" },
                "results": [{
                    "severity": "SEVERITY_NORMAL",
                    "message": "waiting",
                    "target": "TARGET_COMPOSITE_AND_CLAIM"
                }],
                "desired": {
                    "resources": {
                        "rg": { "resource": { "apiVersion": "example.org/v1", "kind": "Thing" } }
                    }
                }
            })
        );
    }
}
