//! # Declarative
//!
//! A framework for declarative resource composition.
//!
//! This crate computes the next desired state of a set of dependent resources
//! from a high-level intent and the host's latest observed snapshot. It does no
//! I/O and keeps no state between calls: the same inputs always produce the
//! same outputs, and the host is expected to call again as the underlying
//! system converges.
//!
//! ## Core Concepts
//!
//! - **Stage**: one resource kind in an ordered pipeline, built from the intent
//!   and the identifiers resolved before it
//! - **ObservedSnapshot**: the host's view of what exists, read-only
//! - **Frontier**: identifiers resolved so far in one evaluation
//! - **Pipeline**: evaluates stages in order, stopping at the first gate
//!   that hasn't been observed with an external name
//! - **DesiredState**: the keyed desired snapshot plus advisory results
//!
//! ## Example
//!
//! ```ignore
//! use declarative::{ObservedSnapshot, Pipeline, assemble};
//!
//! let pipeline = Pipeline::new()
//!     .with_stage(ResourceGroup)?
//!     .with_stage(Account::new(policy, ANNOTATION))?;
//!
//! let observed = ObservedSnapshot::decode(req.observed.resource_documents(), ANNOTATION)?;
//! let state = assemble(pipeline.evaluate(&intent, &observed)?);
//!
//! // Only the resource group until the host has observed it
//! assert!(state.is_waiting());
//! ```

pub mod assembler;
pub mod context;
pub mod diff;
pub mod envelope;
pub mod error;
pub mod planner;
pub mod resource;
pub mod snapshot;
pub mod types;

// Re-export main types at crate root
pub use assembler::{DesiredState, assemble};
pub use context::{Frontier, Provenance, Resolved};
pub use diff::{Change, DiffSummary, ResourceDiff, compute_diffs};
pub use envelope::{DEFAULT_TTL, RunFunctionRequest, RunFunctionResponse};
pub use error::{Error, Result};
pub use planner::{Evaluation, Pipeline, Waiting};
pub use resource::{BoxedStage, Document, ObjectMeta, ResourceDescriptor, Stage};
pub use snapshot::{DesiredSnapshot, ObservedSnapshot};
pub use types::{FunctionResult, Readiness, Severity, Target, WaitReason};
