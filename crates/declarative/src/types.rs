//! Core types for declarative composition

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a result attached to a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Advisory; the host keeps going
    #[serde(rename = "SEVERITY_NORMAL")]
    Normal,
    /// The invocation failed and produced no desired state
    #[serde(rename = "SEVERITY_FATAL")]
    Fatal,
}

/// Audience a result is reported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Target {
    /// Only the composite resource
    #[default]
    #[serde(rename = "TARGET_COMPOSITE")]
    Composite,
    /// The composite resource and the claim bound to it
    #[serde(rename = "TARGET_COMPOSITE_AND_CLAIM")]
    CompositeAndClaim,
}

/// A result reported back to the host alongside desired state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionResult {
    pub severity: Severity,
    pub message: String,
    #[serde(default)]
    pub target: Target,
}

impl FunctionResult {
    /// A normal result targeted at the composite only
    pub fn normal(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Normal,
            message: message.into(),
            target: Target::Composite,
        }
    }

    /// A fatal result targeted at the composite only
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            message: message.into(),
            target: Target::Composite,
        }
    }

    /// Retarget this result at the composite and its claim
    pub fn target_composite_and_claim(mut self) -> Self {
        self.target = Target::CompositeAndClaim;
        self
    }

    /// Check if the result is fatal
    pub fn is_fatal(&self) -> bool {
        matches!(self.severity, Severity::Fatal)
    }
}

/// Why a gated stage isn't ready yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitReason {
    /// The resource hasn't been observed at all
    NotCreated,
    /// The resource exists but carries no external identifier
    PendingIdentifier,
}

impl fmt::Display for WaitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitReason::NotCreated => write!(f, "not created"),
            WaitReason::PendingIdentifier => write!(f, "pending external identifier"),
        }
    }
}

/// Readiness of an observed resource, as seen by its dependents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Observed with a resolved external identifier
    Ready(String),
    /// Dependents must wait
    Waiting(WaitReason),
}

impl Readiness {
    /// Check if the resource is ready
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}
