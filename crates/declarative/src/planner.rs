//! Dependency graph evaluator - walks an ordered pipeline of stages
//!
//! Evaluation is a pure function of the intent and the observed snapshot.
//! Stages are built in order; after a gating stage the evaluator consults the
//! observed snapshot and stops at the first one that isn't ready, so a
//! dependent is never built from a guessed identifier.

use crate::context::{Frontier, Provenance};
use crate::error::{Error, Result};
use crate::resource::{BoxedStage, ResourceDescriptor, Stage};
use crate::snapshot::ObservedSnapshot;
use crate::types::{Readiness, WaitReason};

/// The stage evaluation stopped at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waiting {
    /// Logical key of the stage that isn't ready
    pub key: String,
    /// Human-readable name of that stage
    pub description: String,
    pub reason: WaitReason,
}

impl Waiting {
    /// The advisory message reported to the host
    pub fn message(&self) -> String {
        format!("waiting for {} to be created", self.description)
    }
}

/// Outcome of one evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Descriptors up to the readiness frontier, in stage order
    pub resources: Vec<ResourceDescriptor>,
    /// Set when evaluation stopped before the last stage
    pub waiting: Option<Waiting>,
}

impl Evaluation {
    /// Check if every stage was resolved
    pub fn is_complete(&self) -> bool {
        self.waiting.is_none()
    }
}

/// An ordered composition pipeline over intents of type `I`
pub struct Pipeline<I> {
    stages: Vec<BoxedStage<I>>,
}

impl<I> Pipeline<I> {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage; its key must not already be in the pipeline
    pub fn add_stage(&mut self, stage: BoxedStage<I>) -> Result<()> {
        if self.stages.iter().any(|s| s.key() == stage.key()) {
            return Err(Error::DuplicateStage(stage.key().to_string()));
        }
        self.stages.push(stage);
        Ok(())
    }

    /// Builder-style [`Pipeline::add_stage`]
    pub fn with_stage<S: Stage<I> + 'static>(mut self, stage: S) -> Result<Self> {
        self.add_stage(Box::new(stage))?;
        Ok(self)
    }

    /// Stage keys, in evaluation order
    pub fn keys(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.key()).collect()
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check if the pipeline has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Compute the desired resources reachable from the readiness frontier
    pub fn evaluate(&self, intent: &I, observed: &ObservedSnapshot) -> Result<Evaluation> {
        let mut frontier = Frontier::new();
        let mut resources = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let desired = stage.build(intent, &frontier)?;
            if let Some(name) = &desired.external_name {
                frontier.resolve(stage.key(), name.clone(), Provenance::Derived);
            }
            resources.push(desired);

            if !stage.gates_dependents() {
                continue;
            }

            match observed.readiness(stage.key()) {
                Readiness::Ready(identifier) => {
                    log::debug!("{} resolved to {identifier}", stage.key());
                    frontier.resolve(stage.key(), identifier, Provenance::Observed);
                }
                Readiness::Waiting(reason) => {
                    log::debug!(
                        "{} is {reason}; stopping at {} resources",
                        stage.key(),
                        resources.len()
                    );
                    return Ok(Evaluation {
                        resources,
                        waiting: Some(Waiting {
                            key: stage.key().to_string(),
                            description: stage.description().to_string(),
                            reason,
                        }),
                    });
                }
            }
        }

        Ok(Evaluation {
            resources,
            waiting: None,
        })
    }
}

impl<I> Default for Pipeline<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ANNOTATION: &str = "example.org/external-name";

    /// A toy intent: a single name threaded through a chain of stages
    struct Chain {
        name: String,
    }

    /// A stage that depends on the previous stage's identifier
    #[derive(Debug)]
    struct Link {
        key: &'static str,
        depends_on: Option<&'static str>,
        gated: bool,
        derives_name: bool,
    }

    impl Stage<Chain> for Link {
        fn key(&self) -> &'static str {
            self.key
        }

        fn description(&self) -> &'static str {
            self.key
        }

        fn gates_dependents(&self) -> bool {
            self.gated
        }

        fn build(&self, intent: &Chain, frontier: &Frontier) -> Result<ResourceDescriptor> {
            let parent = match self.depends_on {
                Some(dep) => Some(frontier.require(self.key, dep)?.to_string()),
                None => None,
            };
            let descriptor = ResourceDescriptor::new(self.key, "example.org/v1", "Link")
                .with_spec(&json!({ "parent": parent }))?;

            if self.derives_name {
                let name = format!("{}-{}", intent.name, self.key);
                Ok(descriptor.with_external_name(ANNOTATION, name))
            } else {
                Ok(descriptor)
            }
        }
    }

    fn link(key: &'static str, depends_on: Option<&'static str>, gated: bool) -> Link {
        Link {
            key,
            depends_on,
            gated,
            derives_name: !gated,
        }
    }

    /// a (gated) -> b (gated) -> c (derived) -> d
    fn pipeline() -> Pipeline<Chain> {
        Pipeline::new()
            .with_stage(link("a", None, true))
            .and_then(|p| p.with_stage(link("b", Some("a"), true)))
            .and_then(|p| p.with_stage(link("c", Some("b"), false)))
            .and_then(|p| p.with_stage(link("d", Some("c"), false)))
            .unwrap()
    }

    fn observed(entries: &[(&str, Option<&str>)]) -> ObservedSnapshot {
        let mut snapshot = ObservedSnapshot::new();
        for (key, name) in entries {
            let mut descriptor = ResourceDescriptor::new(*key, "example.org/v1", "Link");
            if let Some(name) = name {
                descriptor = descriptor.with_external_name(ANNOTATION, *name);
            }
            snapshot.insert(descriptor);
        }
        snapshot
    }

    fn intent() -> Chain {
        Chain {
            name: "demo".to_string(),
        }
    }

    fn keys(evaluation: &Evaluation) -> Vec<&str> {
        evaluation.resources.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn test_empty_snapshot_stops_after_root() {
        let evaluation = pipeline().evaluate(&intent(), &observed(&[])).unwrap();

        assert_eq!(keys(&evaluation), vec!["a"]);
        let waiting = evaluation.waiting.unwrap();
        assert_eq!(waiting.key, "a");
        assert_eq!(waiting.reason, WaitReason::NotCreated);
        assert_eq!(waiting.message(), "waiting for a to be created");
    }

    #[test]
    fn test_present_without_identifier_is_not_ready() {
        let evaluation = pipeline()
            .evaluate(&intent(), &observed(&[("a", None)]))
            .unwrap();

        assert_eq!(keys(&evaluation), vec!["a"]);
        assert_eq!(
            evaluation.waiting.unwrap().reason,
            WaitReason::PendingIdentifier
        );
    }

    #[test]
    fn test_frontier_advances_one_gate_at_a_time() {
        let evaluation = pipeline()
            .evaluate(&intent(), &observed(&[("a", Some("a-ext"))]))
            .unwrap();

        assert_eq!(keys(&evaluation), vec!["a", "b"]);
        assert_eq!(evaluation.resources[1].spec["parent"], "a-ext");
        assert_eq!(evaluation.waiting.unwrap().key, "b");
    }

    #[test]
    fn test_derived_identifiers_flow_without_waiting() {
        let evaluation = pipeline()
            .evaluate(
                &intent(),
                &observed(&[("a", Some("a-ext")), ("b", Some("b-ext"))]),
            )
            .unwrap();

        assert!(evaluation.is_complete());
        assert_eq!(keys(&evaluation), vec!["a", "b", "c", "d"]);
        assert_eq!(evaluation.resources[2].spec["parent"], "b-ext");
        assert_eq!(evaluation.resources[3].spec["parent"], "demo-c");
    }

    #[test]
    fn test_later_gate_does_not_skip_earlier_one() {
        // b observed and ready, but a is not: nothing past a may be built
        let evaluation = pipeline()
            .evaluate(&intent(), &observed(&[("b", Some("b-ext"))]))
            .unwrap();

        assert_eq!(keys(&evaluation), vec!["a"]);
    }

    #[test]
    fn test_duplicate_stage_rejected() {
        let result = Pipeline::new()
            .with_stage(link("a", None, true))
            .and_then(|p| p.with_stage(link("a", None, false)));

        assert!(matches!(result, Err(Error::DuplicateStage(key)) if key == "a"));
    }

    #[test]
    fn test_unresolved_dependency_is_an_error() {
        let pipeline = Pipeline::new()
            .with_stage(link("c", Some("missing"), false))
            .unwrap();

        let err = pipeline.evaluate(&intent(), &observed(&[])).unwrap_err();
        assert!(matches!(err, Error::UnresolvedDependency { .. }));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let snapshot = observed(&[("a", Some("a-ext")), ("b", Some("b-ext"))]);
        let first = pipeline().evaluate(&intent(), &snapshot).unwrap();
        let second = pipeline().evaluate(&intent(), &snapshot).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_keys_in_order() {
        assert_eq!(pipeline().keys(), vec!["a", "b", "c", "d"]);
        assert_eq!(pipeline().len(), 4);
    }
}
