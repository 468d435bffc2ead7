//! Execution controller (spec §2 item 9, §4.3): the top-level cursor that
//! runs the resume controller, then walks the stage executors in a fixed
//! order, then persists the index once if anything changed.

use std::path::Path;
use std::time::Duration;

use governator_core::{store, AuditSink, Index};
use governator_vcs::{BranchName, VcsDriver, VcsError};
use thiserror::Error;

use crate::config::Config;
use crate::role_select::RoleSelector;
use crate::stages::{branch, merge, resolve, review, test_stage, work};
use crate::worker::WorkerAdapter;

/// Errors that abort a run before or after stage execution (spec §7: run-level failures).
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("loading task index: {0}")]
    Index(#[from] governator_core::CoreError),
    #[error("branch sweep: {0}")]
    Branch(#[from] VcsError),
}

/// Summary returned at the end of a run (spec §6).
#[derive(Debug, Default, Clone)]
pub struct RunResult {
    pub resumed_tasks: Vec<String>,
    pub blocked_tasks: Vec<String>,
    pub branches_created: usize,
    pub message: String,
}

/// Everything an orchestrator run needs that isn't plain data: the VCS
/// driver, the worker adapter, and the role-selection stub.
pub struct RunDeps<'a> {
    pub vcs: &'a dyn VcsDriver,
    pub worker: &'a dyn WorkerAdapter,
    pub role_selector: &'a dyn RoleSelector,
    pub available_roles: &'a [String],
    pub auditor: &'a dyn AuditSink,
}

/// Runs the resume controller followed by every stage executor in order,
/// persisting `index` to `repo_root`'s task-index file once at the end if
/// any stage mutated it.
pub fn run(
    index: &mut Index,
    repo_root: &Path,
    cfg: &Config,
    deps: &RunDeps<'_>,
) -> Result<RunResult, ControllerError> {
    let main_branch = BranchName::new(cfg.main_branch.clone())?;
    let timeout = Duration::from_secs(cfg.timeouts.worker_seconds);

    let resume_report = crate::resume::run(index, repo_root, cfg.retries.max_attempts, deps.auditor)?;
    let mut mutated = !resume_report.resumed.is_empty();

    mutated |= work::run(index, repo_root, deps.worker, timeout, deps.auditor)?.mutated;
    mutated |= test_stage::run(index, repo_root, deps.worker, timeout, deps.auditor)?.mutated;
    mutated |= review::run(index, repo_root, deps.vcs, &main_branch, deps.worker, timeout, deps.auditor)?.mutated;
    mutated |= resolve::run(
        index,
        repo_root,
        deps.available_roles,
        deps.role_selector,
        deps.worker,
        timeout,
        deps.auditor,
    )?
    .mutated;
    mutated |= merge::run(index, repo_root, deps.vcs, &main_branch, deps.auditor)?.mutated;
    let branches_created = branch::run(index, repo_root, deps.vcs, &main_branch, deps.auditor)?;

    if mutated {
        let path = repo_root.join(store::INDEX_RELATIVE_PATH);
        store::save_atomic(index, &path)?;
    }

    let message = format!(
        "resumed {}, blocked {}, branches created {}",
        resume_report.resumed.len(),
        resume_report.blocked.len(),
        branches_created
    );

    Ok(RunResult {
        resumed_tasks: resume_report.resumed,
        blocked_tasks: resume_report.blocked,
        branches_created,
        message,
    })
}
