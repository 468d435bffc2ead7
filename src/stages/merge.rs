//! The `merge` stage: `resolved -> done | conflict` (spec §4.3 table). No
//! worker dispatch — it only re-runs the rebase-then-merge protocol via the
//! conflict-resolution merge flow entry point.

use std::path::Path;

use governator_core::{AuditSink, CoreError, Index, TaskState};
use governator_vcs::{BranchName, VcsDriver};

use crate::merge_flow::conflict_resolution_merge_flow;
use crate::stages::{run_stage, StageResult};

use super::StageRunReport;

/// Runs the merge stage against every `resolved` task.
pub fn run(
    index: &mut Index,
    repo_root: &Path,
    vcs: &dyn VcsDriver,
    main_branch: &BranchName,
    auditor: &dyn AuditSink,
) -> Result<StageRunReport, CoreError> {
    run_stage(index, auditor, "merge", TaskState::Resolved, |index, id| {
        let task = index.find(id).expect("task collected from in_state must still exist");
        let worktree_root = governator_vcs::worktree_path(repo_root, id, task.attempts.total);
        match conflict_resolution_merge_flow(vcs, repo_root, &worktree_root, task, main_branch) {
            Ok(outcome) => StageResult::NextState(outcome.new_state),
            Err(err) => StageResult::Blocked(err.to_string()),
        }
    })
}
