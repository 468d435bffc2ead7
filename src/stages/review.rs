//! The `review` stage: `tested -> done (via merge flow) | conflict |
//! blocked` (spec §4.3 table). Composite: on worker success it immediately
//! runs the review-merge flow, and the stage's final state is the merge
//! outcome's state, not a fixed "reviewed" hop.

use std::path::Path;
use std::time::Duration;

use governator_core::{AuditSink, CoreError, Index, TaskState};
use governator_vcs::{BranchName, VcsDriver};

use crate::merge_flow::review_merge_flow;
use crate::stages::{run_stage, StageResult};
use crate::worker::{WorkerAdapter, WorkerContext};

use super::StageRunReport;

/// Runs the review stage against every `tested` task.
#[allow(clippy::too_many_arguments)]
pub fn run(
    index: &mut Index,
    repo_root: &Path,
    vcs: &dyn VcsDriver,
    main_branch: &BranchName,
    worker: &dyn WorkerAdapter,
    timeout: Duration,
    auditor: &dyn AuditSink,
) -> Result<StageRunReport, CoreError> {
    run_stage(index, auditor, "review", TaskState::Tested, |index, id| {
        let task = index.find(id).expect("task collected from in_state must still exist");
        let worktree_root = governator_vcs::worktree_path(repo_root, id, task.attempts.total);
        let ctx = WorkerContext {
            repo_root,
            worktree_root: worktree_root.clone(),
            task,
            stage: "review",
            role: task.role.clone(),
            timeout,
        };

        let result = worker.invoke(&ctx);
        if result.timed_out {
            return StageResult::Timeout(result.block_reason.unwrap_or_default());
        }
        if !result.success {
            return StageResult::Blocked(result.block_reason.unwrap_or_default());
        }

        match review_merge_flow(vcs, repo_root, &worktree_root, id, main_branch) {
            Ok(outcome) => StageResult::NextState(outcome.new_state),
            Err(err) => StageResult::Blocked(err.to_string()),
        }
    })
}
