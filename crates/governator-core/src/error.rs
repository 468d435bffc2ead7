//! Error taxonomy for governator-core.
//!
//! Mirrors the spec's error taxonomy (validation / environmental / agent /
//! conflict): this enum covers the *validation* class — errors that must
//! surface immediately, with context, and must never leave a partial state
//! mutation behind.

use thiserror::Error;

/// Errors raised by task-index mutation, state-machine validation, and
/// validation-spec construction.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A task lookup by ID found nothing.
    #[error("task not found: {0}")]
    TaskNotFound(String),

    /// A duplicate `ID` was inserted into an index.
    #[error("duplicate task id: {0}")]
    DuplicateTaskId(String),

    /// An attempted state transition is not in the legal-transition table.
    #[error("illegal transition for task {task_id}: {from:?} -> {to:?}")]
    IllegalTransition {
        /// The task whose transition was rejected.
        task_id: String,
        /// The state the task was in.
        from: crate::TaskState,
        /// The state the caller tried to move it to.
        to: crate::TaskState,
    },

    /// A required field was empty where the spec requires it non-empty.
    #[error("required field empty: {0}")]
    EmptyField(&'static str),

    /// A `PlanningValidationSpec` carried a field its `Type` forbids.
    #[error("validation spec of type {spec_type} must not set {field}")]
    ForbiddenField {
        /// The spec's declared type.
        spec_type: &'static str,
        /// The field that is not permitted for that type.
        field: &'static str,
    },

    /// An unknown `PlanningValidationSpec` type was encountered.
    #[error("unknown validation spec type: {0}")]
    UnknownSpecType(String),

    /// A regex pattern in a validation spec failed to compile.
    #[error("invalid regex in validation spec: {0}")]
    InvalidRegex(String),

    /// Serialization/deserialization of the task index failed.
    #[error("index (de)serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// An I/O error occurred loading or saving the task index.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
