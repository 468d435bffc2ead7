//! The audit sink contract (spec §2 item 3, §6).
//!
//! An append-only receiver of transition and worker events. The concrete
//! stdout/stderr implementation lives in the `governator` binary crate,
//! which owns log formatting; this crate only defines the seam so stage
//! executors can depend on a trait instead of a concrete writer.

use crate::models::TransitionEvent;

/// A stage-level lifecycle event for one task (spec §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageEvent {
    TaskStart { task_id: String, role: String, stage: String },
    TaskComplete { task_id: String, stage: String },
    TaskFailure { task_id: String, stage: String, reason: String },
    TaskTimeout { task_id: String, stage: String },
}

/// Append-only receiver of audit events.
pub trait AuditSink {
    /// Records a task's transition from `event.old` to `event.new`.
    fn on_transition(&self, event: &TransitionEvent);

    /// Records a stage-level lifecycle event.
    fn on_stage_event(&self, event: &StageEvent);
}

/// An [`AuditSink`] that discards every event; useful for tests that don't
/// care about the audit trail.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn on_transition(&self, _event: &TransitionEvent) {}
    fn on_stage_event(&self, _event: &StageEvent) {}
}
