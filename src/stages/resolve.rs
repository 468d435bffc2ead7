//! The `resolve` stage: `conflict -> resolved | conflict (retry) | blocked`
//! (spec §4.3 table). Asymmetric by design: a worker failure re-enters
//! `conflict` for another attempt, while a transition-validation error forces
//! `blocked`. Role selection for this stage is delegated to a
//! [`RoleSelector`], and the *selected* role — not the task's stored role —
//! is used both to pick the worker configuration and to tag audit events.

use std::path::Path;
use std::time::Duration;

use governator_core::{store, AuditSink, CoreError, Index, StageEvent, TaskState};

use crate::role_select::RoleSelector;
use crate::worker::{WorkerAdapter, WorkerContext};

use super::StageRunReport;

/// Runs the resolve stage against every `conflict` task.
#[allow(clippy::too_many_arguments)]
pub fn run(
    index: &mut Index,
    repo_root: &Path,
    available_roles: &[String],
    role_selector: &dyn RoleSelector,
    worker: &dyn WorkerAdapter,
    timeout: Duration,
    auditor: &dyn AuditSink,
) -> Result<StageRunReport, CoreError> {
    let task_ids: Vec<String> = index.in_state(TaskState::Conflict).map(|t| t.id.clone()).collect();
    let mut mutated = false;

    for id in task_ids {
        let (role, _rationale) = role_selector.invoke(available_roles, &id);
        auditor.on_stage_event(&StageEvent::TaskStart {
            task_id: id.clone(),
            role: role.clone(),
            stage: "resolve".to_string(),
        });

        let task = index.find(&id).expect("task collected from in_state must still exist");
        let worktree_root = governator_vcs::worktree_path(repo_root, &id, task.attempts.total);
        let ctx = WorkerContext {
            repo_root,
            worktree_root,
            task,
            stage: "resolve",
            role: role.clone(),
            timeout,
        };
        let result = worker.invoke(&ctx);

        let (desired, timed_out, failure_reason) = if result.timed_out {
            (TaskState::Blocked, true, result.block_reason)
        } else if result.success {
            (TaskState::Resolved, false, None)
        } else {
            // Worker failure: retry via conflict, not blocked (spec §4.3).
            (TaskState::Conflict, false, result.block_reason)
        };

        match store::transition_state(index, &id, desired, auditor) {
            Ok(()) => mutated = true,
            Err(_mapping_failure) => {
                store::transition_state(index, &id, TaskState::Blocked, auditor)?;
                mutated = true;
            }
        }

        if timed_out {
            auditor.on_stage_event(&StageEvent::TaskTimeout { task_id: id.clone(), stage: "resolve".to_string() });
        } else if let Some(reason) = failure_reason {
            auditor.on_stage_event(&StageEvent::TaskFailure { task_id: id.clone(), stage: "resolve".to_string(), reason });
        } else {
            auditor.on_stage_event(&StageEvent::TaskComplete { task_id: id.clone(), stage: "resolve".to_string() });
        }
    }

    Ok(StageRunReport { mutated })
}
