//! Error types for the declarative crate

use thiserror::Error;

/// Errors that can occur while composing desired state
///
/// Every variant is fatal for the invocation that produced it. A dependency
/// that simply hasn't been observed yet is not an error; see
/// [`crate::types::Readiness`].
#[derive(Error, Debug)]
pub enum Error {
    /// A document could not be parsed into its typed form
    #[error("cannot decode {what}: {source}")]
    Decode {
        /// What was being decoded (e.g. "composite resource")
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request carried no composite resource
    #[error("cannot get composite resource: request has no observed composite")]
    MissingComposite,

    /// A required intent field is missing or invalid
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// A typed spec could not be encoded into a document
    #[error("cannot encode desired resource {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stage asked for an identifier that no earlier stage resolved
    #[error("stage {stage} depends on {dependency}, which has not been resolved")]
    UnresolvedDependency { stage: String, dependency: String },

    /// Two stages in one pipeline share a logical key
    #[error("duplicate stage key: {0}")]
    DuplicateStage(String),
}

impl Error {
    /// Create a decode error for the named document
    pub fn decode(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            what: what.into(),
            source,
        }
    }

    /// Create a validation error for an intent field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type for declarative operations
pub type Result<T> = std::result::Result<T, Error>;
