//! Subprocess-backed [`VcsDriver`] implementation.
//!
//! Shells out to the system `git` binary the same way the worker adapter
//! shells out to agent subprocesses: capture stdout/stderr, check the exit
//! status, wrap non-zero exits as [`VcsError`]. Git writes its `CONFLICT`
//! banner to stdout but a rebase's `could not apply` hint to stderr, so the
//! classifiers run against stdout and stderr concatenated, not stderr alone.

use std::path::Path;
use std::process::{Command, Output};

use tracing::debug;

use crate::classify::{is_merge_conflict, is_rebase_conflict};
use crate::repo::VcsDriver;
use crate::types::{BranchName, IntegrationOutcome};
use crate::VcsError;

/// [`VcsDriver`] implementation that shells out to the `git` CLI found on `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitCli {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn run(dir: &Path, args: &[&str]) -> Result<Output, VcsError> {
        if dir.as_os_str().is_empty() {
            return Err(VcsError::InvalidArgument(
                "working directory must not be empty".to_string(),
            ));
        }
        if args.is_empty() {
            return Err(VcsError::InvalidArgument(
                "git arguments must not be empty".to_string(),
            ));
        }
        debug!(?dir, ?args, "running git");
        let output = Command::new("git").args(args).current_dir(dir).output()?;
        Ok(output)
    }

    fn run_checked(dir: &Path, args: &[&str]) -> Result<(), VcsError> {
        let output = Self::run(dir, args)?;
        if output.status.success() {
            return Ok(());
        }
        Err(VcsError::BackendError {
            exit_code: output.status.code(),
            message: combined_output(&output),
        })
    }
}

/// Git mixes its progress/conflict banners between stdout and stderr
/// depending on the subcommand (observed: `merge`'s `CONFLICT` line is on
/// stdout, a rebase's `could not apply` hint is on stderr). Concatenate both
/// so the substring classifiers see everything.
fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

impl VcsDriver for GitCli {
    fn worktree_add(
        &self,
        repo_root: &Path,
        worktree_path: &Path,
        branch: &BranchName,
        base: &BranchName,
    ) -> Result<(), VcsError> {
        if worktree_path.as_os_str().is_empty() {
            return Err(VcsError::InvalidArgument(
                "worktree path must not be empty".to_string(),
            ));
        }
        if !self.branch_exists(repo_root, branch)? {
            self.branch_create(repo_root, branch, base)?;
        }
        let path_str = worktree_path.to_string_lossy();
        Self::run_checked(repo_root, &["worktree", "add", &path_str, branch.as_str()])
    }

    fn branch_exists(&self, repo_root: &Path, branch: &BranchName) -> Result<bool, VcsError> {
        let ref_arg = format!("refs/heads/{}", branch.as_str());
        let output = Self::run(repo_root, &["show-ref", "--verify", "--quiet", &ref_arg])?;
        Ok(output.status.success())
    }

    fn branch_create(&self, repo_root: &Path, branch: &BranchName, base: &BranchName) -> Result<(), VcsError> {
        Self::run_checked(repo_root, &["branch", branch.as_str(), base.as_str()])
    }

    fn fetch(&self, worktree_path: &Path) -> Result<(), VcsError> {
        Self::run_checked(worktree_path, &["fetch"])
    }

    fn rebase(&self, worktree_path: &Path, onto: &BranchName) -> Result<IntegrationOutcome, VcsError> {
        let output = Self::run(worktree_path, &["rebase", onto.as_str()])?;
        if output.status.success() {
            return Ok(IntegrationOutcome::Clean);
        }
        let message = combined_output(&output);
        if is_rebase_conflict(&message) {
            return Ok(IntegrationOutcome::Conflict { message });
        }
        Err(VcsError::BackendError {
            exit_code: output.status.code(),
            message,
        })
    }

    fn merge(&self, repo_root: &Path, branch: &BranchName) -> Result<IntegrationOutcome, VcsError> {
        let output = Self::run(repo_root, &["merge", "--no-ff", branch.as_str()])?;
        if output.status.success() {
            return Ok(IntegrationOutcome::Clean);
        }
        let message = combined_output(&output);
        if is_merge_conflict(&message) {
            return Ok(IntegrationOutcome::Conflict { message });
        }
        Err(VcsError::BackendError {
            exit_code: output.status.code(),
            message,
        })
    }

    fn checkout(&self, repo_root: &Path, branch: &BranchName) -> Result<(), VcsError> {
        Self::run_checked(repo_root, &["checkout", branch.as_str()])
    }
}
