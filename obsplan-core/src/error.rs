//! Error types for obsplan-core.

use thiserror::Error;

/// Input rejected before any mutation took place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A text field was empty (or whitespace only).
    #[error("{field} must be a non-empty string")]
    EmptyString { field: String },

    /// An observation failed its own structural check.
    #[error("invalid observation '{code}': {reason}")]
    Observation { code: String, reason: String },

    /// An element of an initial observation sequence was rejected.
    #[error("observation at position {position} is invalid: {reason}")]
    InvalidObservation { position: usize, reason: String },
}

/// All errors that can arise from project operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Name, code or observation rejected by validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Positional access outside the operation's valid range.
    #[error("index {index} is out of range for project with {len} observations")]
    IndexOutOfRange { index: usize, len: usize },

    /// A required key is absent from a serialized mapping.
    #[error("missing field `{field}` in serialized mapping")]
    MissingField { field: &'static str },

    /// A key is present but its value has the wrong shape.
    #[error("malformed field `{field}`: {source}")]
    Malformed {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// JSON document encode/decode failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML document encode/decode failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ProjectError {
    /// `true` for [`ProjectError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, ProjectError::Validation(_))
    }

    /// `true` for [`ProjectError::IndexOutOfRange`].
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, ProjectError::IndexOutOfRange { .. })
    }
}
