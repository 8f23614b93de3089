//! Desired-state assembler
//!
//! Turns an [`Evaluation`] into what the host expects back: a keyed desired
//! snapshot and at most one advisory result. Stateless; nothing from an
//! earlier invocation is consulted.

use crate::planner::Evaluation;
use crate::snapshot::DesiredSnapshot;
use crate::types::FunctionResult;

/// Desired resources plus the results to report with them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesiredState {
    pub resources: DesiredSnapshot,
    pub results: Vec<FunctionResult>,
}

impl DesiredState {
    /// Check if the host should expect to call again for more resources
    pub fn is_waiting(&self) -> bool {
        !self.results.is_empty()
    }
}

/// Assemble an evaluation into desired state
pub fn assemble(evaluation: Evaluation) -> DesiredState {
    let results = evaluation
        .waiting
        .as_ref()
        .map(|w| FunctionResult::normal(w.message()).target_composite_and_claim())
        .into_iter()
        .collect();

    DesiredState {
        resources: evaluation.resources.into_iter().collect(),
        results,
    }
}
