//! Merge flow (spec §4.5): the rebase-then-merge protocol shared by the
//! review stage and the merge stage, with distinct rebase-conflict and
//! merge-conflict classification applied by `governator-vcs`.

use std::path::Path;

use governator_core::{Task, TaskState};
use governator_vcs::{BranchName, IntegrationOutcome, VcsDriver, VcsError};
use thiserror::Error;

/// Result of running either merge-flow entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub success: bool,
    pub new_state: TaskState,
    pub conflict_error: Option<String>,
}

impl MergeOutcome {
    fn done() -> Self {
        Self { success: true, new_state: TaskState::Done, conflict_error: None }
    }

    fn conflict(message: String) -> Self {
        Self { success: false, new_state: TaskState::Conflict, conflict_error: Some(message) }
    }
}

/// Errors that abort the merge flow outright, as opposed to conflict
/// outcomes (which are not errors — see spec §7).
#[derive(Debug, Error)]
pub enum MergeFlowError {
    #[error("{0}")]
    Precondition(String),
    #[error(transparent)]
    Vcs(#[from] VcsError),
}

fn require_non_empty(value: &str, field: &str) -> Result<(), MergeFlowError> {
    if value.trim().is_empty() {
        return Err(MergeFlowError::Precondition(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Runs the shared rebase-then-merge protocol once preconditions for the
/// specific entry point have been checked.
fn run_protocol(
    vcs: &dyn VcsDriver,
    repo_root: &Path,
    worktree_path: &Path,
    task_id: &str,
    main_branch: &BranchName,
) -> Result<MergeOutcome, MergeFlowError> {
    require_non_empty(repo_root.to_string_lossy().as_ref(), "repo_root")?;
    require_non_empty(worktree_path.to_string_lossy().as_ref(), "worktree_path")?;
    require_non_empty(task_id, "task.id")?;

    let task_branch = BranchName::new(format!("task/{task_id}"))?;

    vcs.fetch(worktree_path)?;
    match vcs.rebase(worktree_path, main_branch)? {
        IntegrationOutcome::Conflict { message } => return Ok(MergeOutcome::conflict(message)),
        IntegrationOutcome::Clean => {}
    }

    vcs.checkout(repo_root, main_branch)?;
    match vcs.merge(repo_root, &task_branch)? {
        IntegrationOutcome::Conflict { message } => return Ok(MergeOutcome::conflict(message)),
        IntegrationOutcome::Clean => {}
    }

    Ok(MergeOutcome::done())
}

/// Entry point invoked at the end of a successful review (spec §4.5).
/// Preconditions: `repo_root`, `worktree_path`, `task_id` all non-empty.
pub fn review_merge_flow(
    vcs: &dyn VcsDriver,
    repo_root: &Path,
    worktree_path: &Path,
    task_id: &str,
    main_branch: &BranchName,
) -> Result<MergeOutcome, MergeFlowError> {
    run_protocol(vcs, repo_root, worktree_path, task_id, main_branch)
}

/// Entry point invoked by the merge stage (spec §4.5). Additional
/// precondition: `task.state == resolved`.
pub fn conflict_resolution_merge_flow(
    vcs: &dyn VcsDriver,
    repo_root: &Path,
    worktree_path: &Path,
    task: &Task,
    main_branch: &BranchName,
) -> Result<MergeOutcome, MergeFlowError> {
    if task.state != TaskState::Resolved {
        return Err(MergeFlowError::Precondition(
            "task must be in resolved state".to_string(),
        ));
    }
    run_protocol(vcs, repo_root, worktree_path, &task.id, main_branch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use governator_core::{Attempts, Retries, TaskKind};
    use std::cell::RefCell;

    #[derive(Default)]
    struct ScriptedVcs {
        rebase_outcome: RefCell<Option<IntegrationOutcome>>,
        merge_outcome: RefCell<Option<IntegrationOutcome>>,
    }

    impl VcsDriver for ScriptedVcs {
        fn worktree_add(&self, _: &Path, _: &Path, _: &BranchName, _: &BranchName) -> Result<(), VcsError> {
            Ok(())
        }
        fn branch_exists(&self, _: &Path, _: &BranchName) -> Result<bool, VcsError> {
            Ok(true)
        }
        fn branch_create(&self, _: &Path, _: &BranchName, _: &BranchName) -> Result<(), VcsError> {
            Ok(())
        }
        fn fetch(&self, _: &Path) -> Result<(), VcsError> {
            Ok(())
        }
        fn rebase(&self, _: &Path, _: &BranchName) -> Result<IntegrationOutcome, VcsError> {
            Ok(self.rebase_outcome.borrow().clone().unwrap_or(IntegrationOutcome::Clean))
        }
        fn merge(&self, _: &Path, _: &BranchName) -> Result<IntegrationOutcome, VcsError> {
            Ok(self.merge_outcome.borrow().clone().unwrap_or(IntegrationOutcome::Clean))
        }
        fn checkout(&self, _: &Path, _: &BranchName) -> Result<(), VcsError> {
            Ok(())
        }
    }

    fn sample_task(state: TaskState) -> Task {
        Task {
            id: "T-1".into(),
            title: "t".into(),
            path: "p".into(),
            role: "implementer".into(),
            kind: TaskKind::WorkItem,
            state,
            attempts: Attempts::default(),
            retries: Retries::default(),
        }
    }

    #[test]
    fn conflict_resolution_rejects_non_resolved_task() {
        let vcs = ScriptedVcs::default();
        let task = sample_task(TaskState::Tested);
        let main = BranchName::new("main").unwrap();
        let err = conflict_resolution_merge_flow(&vcs, Path::new("/repo"), Path::new("/repo/wt"), &task, &main)
            .unwrap_err();
        match err {
            MergeFlowError::Precondition(msg) => assert!(msg.contains("task must be in resolved state")),
            _ => panic!("expected precondition error"),
        }
    }

    #[test]
    fn review_merge_flow_succeeds_when_both_steps_clean() {
        let vcs = ScriptedVcs::default();
        let main = BranchName::new("main").unwrap();
        let outcome = review_merge_flow(&vcs, Path::new("/repo"), Path::new("/repo/wt"), "T-1", &main).unwrap();
        assert_eq!(outcome.new_state, TaskState::Done);
        assert!(outcome.success);
    }

    #[test]
    fn review_merge_flow_reports_conflict_on_rebase_failure() {
        let vcs = ScriptedVcs::default();
        *vcs.rebase_outcome.borrow_mut() = Some(IntegrationOutcome::Conflict { message: "CONFLICT in x".into() });
        let main = BranchName::new("main").unwrap();
        let outcome = review_merge_flow(&vcs, Path::new("/repo"), Path::new("/repo/wt"), "T-1", &main).unwrap();
        assert_eq!(outcome.new_state, TaskState::Conflict);
        assert!(!outcome.success);
    }

    #[test]
    fn review_merge_flow_reports_conflict_on_merge_failure() {
        let vcs = ScriptedVcs::default();
        *vcs.merge_outcome.borrow_mut() = Some(IntegrationOutcome::Conflict { message: "Automatic merge failed".into() });
        let main = BranchName::new("main").unwrap();
        let outcome = review_merge_flow(&vcs, Path::new("/repo"), Path::new("/repo/wt"), "T-1", &main).unwrap();
        assert_eq!(outcome.new_state, TaskState::Conflict);
    }

    #[test]
    fn review_merge_flow_rejects_empty_task_id() {
        let vcs = ScriptedVcs::default();
        let main = BranchName::new("main").unwrap();
        let err = review_merge_flow(&vcs, Path::new("/repo"), Path::new("/repo/wt"), "", &main).unwrap_err();
        assert!(matches!(err, MergeFlowError::Precondition(_)));
    }
}
