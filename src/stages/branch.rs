//! Branch sweep (spec §4.7): for every `open` task, ensure `task/<id>`
//! exists off the configured base branch. Runs last in the pipeline so it
//! also prepares freshly-resumed tasks for the next run. Unlike the other
//! stages this does not transition task state — `open` tasks stay `open`.

use std::path::Path;

use governator_core::{AuditSink, Index, StageEvent, TaskState};
use governator_vcs::{BranchName, VcsDriver, VcsError};

/// Runs the branch sweep against every `open` task. Returns the number of
/// branches actually created (for the run summary); creating zero branches
/// is not a mutation of the task index.
pub fn run(
    index: &Index,
    repo_root: &Path,
    vcs: &dyn VcsDriver,
    base_branch: &BranchName,
    auditor: &dyn AuditSink,
) -> Result<usize, VcsError> {
    let mut created = 0;
    for task in index.in_state(TaskState::Open) {
        auditor.on_stage_event(&StageEvent::TaskStart {
            task_id: task.id.clone(),
            role: task.role.clone(),
            stage: "branch".to_string(),
        });

        let branch = BranchName::new(format!("task/{}", task.id))?;
        if vcs.branch_exists(repo_root, &branch)? {
            auditor.on_stage_event(&StageEvent::TaskComplete { task_id: task.id.clone(), stage: "branch".to_string() });
            continue;
        }
        vcs.branch_create(repo_root, &branch, base_branch)?;
        created += 1;
        auditor.on_stage_event(&StageEvent::TaskComplete { task_id: task.id.clone(), stage: "branch".to_string() });
    }
    Ok(created)
}
