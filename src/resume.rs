//! Resume controller (spec §4.6): runs at orchestrator startup, before
//! stage execution, to reopen blocked tasks whose worktrees survived a
//! crash or were preserved across runs.

use std::path::Path;

use governator_core::{store, AuditSink, CoreError, Index, ResumeCandidate, TaskState};
use governator_vcs::worktree_path;

/// Outcome of one resume pass over the index.
#[derive(Debug, Default, Clone)]
pub struct ResumeReport {
    pub resumed: Vec<String>,
    pub blocked: Vec<String>,
}

/// Detects, partitions, and applies resume decisions for every `blocked`
/// task in `index` (spec §4.6 steps 1-4).
pub fn run(
    index: &mut Index,
    repo_root: &Path,
    global_max_attempts: u32,
    auditor: &dyn AuditSink,
) -> Result<ResumeReport, CoreError> {
    let candidates = detect(index, repo_root);
    let mut report = ResumeReport::default();

    for candidate in candidates {
        let task = index
            .find(&candidate.task_id)
            .expect("candidate was derived from an existing task");
        let max_attempts = task.retries.effective_max_attempts(global_max_attempts);

        if task.attempts.total >= max_attempts {
            report.blocked.push(candidate.task_id.clone());
            continue;
        }

        store::increment_task_attempt(index, &candidate.task_id)?;
        store::transition_state(index, &candidate.task_id, TaskState::Open, auditor)?;
        report.resumed.push(candidate.task_id);
    }

    Ok(report)
}

/// Computes the resume candidates for every `blocked` task with a preserved
/// worktree on disk (spec §4.6 step 1).
fn detect(index: &Index, repo_root: &Path) -> Vec<ResumeCandidate> {
    index
        .in_state(TaskState::Blocked)
        .filter_map(|task| {
            let attempt = task.attempts.total.max(1);
            let path = worktree_path(repo_root, &task.id, attempt);
            path.is_dir().then(|| ResumeCandidate {
                task_id: task.id.clone(),
                worktree_path: path,
                attempt,
            })
        })
        .collect()
}
