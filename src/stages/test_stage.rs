//! The `test` stage: `worked -> tested | blocked` (spec §4.3 table).

use std::path::Path;
use std::time::Duration;

use governator_core::{AuditSink, CoreError, Index, TaskState};

use crate::stages::{run_stage, StageResult};
use crate::worker::{WorkerAdapter, WorkerContext};

use super::StageRunReport;

/// Runs the test stage against every `worked` task.
pub fn run(
    index: &mut Index,
    repo_root: &Path,
    worker: &dyn WorkerAdapter,
    timeout: Duration,
    auditor: &dyn AuditSink,
) -> Result<StageRunReport, CoreError> {
    run_stage(index, auditor, "test", TaskState::Worked, |index, id| {
        let task = index.find(id).expect("task collected from in_state must still exist");
        let worktree_root = governator_vcs::worktree_path(repo_root, id, task.attempts.total);
        let ctx = WorkerContext {
            repo_root,
            worktree_root,
            task,
            stage: "test",
            role: task.role.clone(),
            timeout,
        };
        let result = worker.invoke(&ctx);
        if result.timed_out {
            StageResult::Timeout(result.block_reason.unwrap_or_default())
        } else if result.success {
            StageResult::NextState(result.new_state.unwrap_or(TaskState::Tested))
        } else {
            StageResult::Blocked(result.block_reason.unwrap_or_default())
        }
    })
}
