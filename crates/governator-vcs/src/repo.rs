//! The [`VcsDriver`] trait — the only seam through which the orchestrator
//! touches git. No governator crate should invoke a VCS binary directly;
//! instead they depend on `governator-vcs` and program against this trait,
//! which keeps the conflict-classification and subprocess-invocation details
//! out of the orchestration logic.

use std::path::{Path, PathBuf};

use crate::types::{BranchName, IntegrationOutcome};
use crate::VcsError;

/// Operation set over a single repository checkout plus its worktrees.
///
/// Implementations must reject empty `worktree_path`/`repo_root` arguments
/// and empty argument lists before invoking any subprocess (spec §4.5).
pub trait VcsDriver {
    /// Creates a worktree at `worktree_path` checked out to `branch`, creating
    /// the branch off `base` if it does not already exist.
    fn worktree_add(
        &self,
        repo_root: &Path,
        worktree_path: &Path,
        branch: &BranchName,
        base: &BranchName,
    ) -> Result<(), VcsError>;

    /// Returns whether `branch` exists in `repo_root`.
    fn branch_exists(&self, repo_root: &Path, branch: &BranchName) -> Result<bool, VcsError>;

    /// Creates `branch` off `base` in `repo_root`. Errors if `branch` already
    /// exists; callers must check [`VcsDriver::branch_exists`] first.
    fn branch_create(&self, repo_root: &Path, branch: &BranchName, base: &BranchName) -> Result<(), VcsError>;

    /// Fetches from the worktree's configured remote/origin.
    fn fetch(&self, worktree_path: &Path) -> Result<(), VcsError>;

    /// Rebases the worktree's current branch onto `onto`.
    fn rebase(&self, worktree_path: &Path, onto: &BranchName) -> Result<IntegrationOutcome, VcsError>;

    /// Merges `branch` into the currently checked-out branch in `repo_root`
    /// with `--no-ff`.
    fn merge(&self, repo_root: &Path, branch: &BranchName) -> Result<IntegrationOutcome, VcsError>;

    /// Checks out `branch` in `repo_root`.
    fn checkout(&self, repo_root: &Path, branch: &BranchName) -> Result<(), VcsError>;
}

/// Computes the deterministic worktree path for a task attempt (spec §6).
#[must_use]
pub fn worktree_path(repo_root: &Path, task_id: &str, attempt: u32) -> PathBuf {
    let attempt = attempt.max(1);
    repo_root
        .join("_governator")
        .join("worktrees")
        .join(task_id)
        .join(attempt.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worktree_path_is_deterministic() {
        let root = Path::new("/repo");
        assert_eq!(
            worktree_path(root, "T-001", 2),
            root.join("_governator/worktrees/T-001/2")
        );
    }

    #[test]
    fn worktree_path_treats_zero_attempt_as_one() {
        let root = Path::new("/repo");
        assert_eq!(
            worktree_path(root, "T-001", 0),
            worktree_path(root, "T-001", 1)
        );
    }
}
