//! Error types for VCS operations.
//!
//! [`VcsError`] is the single error type returned by all [`VcsDriver`](crate::VcsDriver)
//! methods. It carries rich variants so callers can match on specific failure
//! modes without parsing messages, plus a catch-all `BackendError` for the
//! CLI backend's raw stderr — the substring classifiers in [`crate::classify`]
//! operate on that catch-all's message.

use thiserror::Error;

/// Errors returned by [`VcsDriver`](crate::VcsDriver) operations.
#[derive(Debug, Error)]
pub enum VcsError {
    /// A required argument (worktree path, repo root, ref name) was empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The named branch does not exist.
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// An I/O error occurred spawning or communicating with the git process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `git rebase` produced conflicts.
    #[error("rebase conflict: {message}")]
    RebaseConflict {
        /// Raw stderr from the failed rebase.
        message: String,
    },

    /// `git merge` produced conflicts.
    #[error("merge conflict: {message}")]
    MergeConflict {
        /// Raw stderr from the failed merge.
        message: String,
    },

    /// The underlying git CLI returned an unclassified non-zero exit.
    ///
    /// Catch-all for errors that don't match a known conflict pattern. The
    /// `message` carries the raw stderr so callers can classify it further
    /// (see [`crate::classify`]) or surface it verbatim.
    #[error("git backend error (exit {exit_code:?}): {message}")]
    BackendError {
        /// Exit code of the git process, if it ran to completion.
        exit_code: Option<i32>,
        /// Raw stderr / diagnostic text from the backend.
        message: String,
    },
}
