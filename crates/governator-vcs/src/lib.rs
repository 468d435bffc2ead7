//! Git abstraction layer for governator.
//!
//! No governator crate should invoke `git` directly; instead they depend on
//! this crate and program against [`VcsDriver`]. The CLI-backed
//! implementation, [`GitCli`], is the only module that spawns a subprocess.

mod classify;
mod error;
mod git_cli;
mod repo;
mod types;

pub use classify::{is_merge_conflict, is_rebase_conflict};
pub use error::VcsError;
pub use git_cli::GitCli;
pub use repo::{worktree_path, VcsDriver};
pub use types::{BranchName, IntegrationOutcome, Worktree};
