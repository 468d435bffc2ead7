//! Core domain logic for governator: the task index, its state machine,
//! validation-spec types, and merge-classification-adjacent error taxonomy.
//!
//! Nothing in this crate spawns a subprocess or talks to git; that lives in
//! `governator-vcs`. Nothing here parses CLI args or loads config; that
//! lives in the `governator` binary crate.

pub mod audit;
pub mod digest;
pub mod error;
pub mod models;
pub mod state_machine;
pub mod store;
pub mod validation_spec;

pub use audit::{AuditSink, NullAuditSink, StageEvent};
pub use error::CoreError;
pub use models::{Attempts, Index, IngestResult, Retries, ResumeCandidate, Task, TaskKind, TransitionEvent};
pub use state_machine::TaskState;
pub use validation_spec::{Expect, PlanningValidationSpec, ValidationSpecResult};
