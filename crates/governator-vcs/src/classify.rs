//! Error-string classification for rebase and merge failures.
//!
//! The classifiers are deliberately distinct substring sets per operation:
//! `"could not apply"` only ever appears in rebase output, and `"Automatic
//! merge failed"` only in merge output. Mixing them would either drop a real
//! conflict into the blocked path or loop a fatal, unrelated error through
//! conflict resolution. Both sets share the case-sensitive `"CONFLICT"`
//! marker that both git subcommands emit.

/// Returns `true` if `stderr` indicates a rebase produced merge conflicts.
#[must_use]
pub fn is_rebase_conflict(stderr: &str) -> bool {
    stderr.contains("CONFLICT") || stderr.contains("could not apply") || stderr.contains("merge conflict")
}

/// Returns `true` if `stderr` indicates a merge produced merge conflicts.
#[must_use]
pub fn is_merge_conflict(stderr: &str) -> bool {
    stderr.contains("CONFLICT") || stderr.contains("Automatic merge failed") || stderr.contains("merge conflict")
}
