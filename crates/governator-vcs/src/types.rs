//! Plain value types shared across the VCS trait surface.

use std::fmt;
use std::path::PathBuf;

/// Name of a git branch, e.g. `"task/T-102"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    /// Wraps `name`, rejecting empty strings.
    pub fn new(name: impl Into<String>) -> Result<Self, crate::VcsError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(crate::VcsError::InvalidArgument(
                "branch name must not be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a `rebase` or `merge` operation that can fail with conflicts
/// rather than a hard error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrationOutcome {
    /// The operation completed cleanly.
    Clean,
    /// The operation stopped with conflicts; raw stderr is preserved for
    /// diagnostics and for re-classification if needed.
    Conflict {
        /// Raw stderr from the failed operation.
        message: String,
    },
}

impl IntegrationOutcome {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }
}

/// Location and identity of a worktree created for a single task attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worktree {
    /// Absolute path to the worktree's checkout.
    pub path: PathBuf,
    /// Branch checked out in the worktree.
    pub branch: BranchName,
}
