//! Stdout/stderr [`AuditSink`](governator_core::AuditSink) implementation
//! (spec §6): transition and task-complete events go to stdout, warnings to
//! stderr.

use governator_core::{AuditSink, StageEvent, TransitionEvent};
use tracing::{info, warn};

/// Writes audit events through `tracing`, at `info` for normal progress and
/// `warn` for failures/timeouts.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutAuditSink;

impl AuditSink for StdoutAuditSink {
    fn on_transition(&self, event: &TransitionEvent) {
        info!(
            task_id = %event.task_id,
            role = %event.role,
            old = ?event.old,
            new = ?event.new,
            "task transition"
        );
    }

    fn on_stage_event(&self, event: &StageEvent) {
        match event {
            StageEvent::TaskStart { task_id, role, stage } => {
                info!(task_id = %task_id, role = %role, stage = %stage, "task start");
            }
            StageEvent::TaskComplete { task_id, stage } => {
                info!(task_id = %task_id, stage = %stage, "task complete");
            }
            StageEvent::TaskFailure { task_id, stage, reason } => {
                warn!(task_id = %task_id, stage = %stage, reason = %reason, "task failure");
            }
            StageEvent::TaskTimeout { task_id, stage } => {
                warn!(task_id = %task_id, stage = %stage, "task timeout");
            }
        }
    }
}
