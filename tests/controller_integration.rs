//! End-to-end exercise of the execution controller: a single `open` task
//! should traverse work -> test -> review -> done in one run, since each
//! stage runs to completion before the next begins (spec §4.3).

use std::path::Path;
use std::time::Duration;

use governator::config::Config;
use governator::controller::{self, RunDeps};
use governator::role_select::FirstAvailableRoleSelector;
use governator::worker::{WorkerAdapter, WorkerContext};
use governator_core::{Attempts, AuditSink, Index, Retries, StageEvent, Task, TaskKind, TaskState, TransitionEvent};
use governator_vcs::{BranchName, IntegrationOutcome, VcsDriver, VcsError};

struct AlwaysSucceedsWorker;

impl WorkerAdapter for AlwaysSucceedsWorker {
    fn invoke(&self, _ctx: &WorkerContext<'_>) -> governator_core::IngestResult {
        governator_core::IngestResult { success: true, new_state: None, block_reason: None, timed_out: false }
    }
}

struct CleanVcs;

impl VcsDriver for CleanVcs {
    fn worktree_add(&self, _: &Path, _: &Path, _: &BranchName, _: &BranchName) -> Result<(), VcsError> {
        Ok(())
    }
    fn branch_exists(&self, _: &Path, _: &BranchName) -> Result<bool, VcsError> {
        Ok(false)
    }
    fn branch_create(&self, _: &Path, _: &BranchName, _: &BranchName) -> Result<(), VcsError> {
        Ok(())
    }
    fn fetch(&self, _: &Path) -> Result<(), VcsError> {
        Ok(())
    }
    fn rebase(&self, _: &Path, _: &BranchName) -> Result<IntegrationOutcome, VcsError> {
        Ok(IntegrationOutcome::Clean)
    }
    fn merge(&self, _: &Path, _: &BranchName) -> Result<IntegrationOutcome, VcsError> {
        Ok(IntegrationOutcome::Clean)
    }
    fn checkout(&self, _: &Path, _: &BranchName) -> Result<(), VcsError> {
        Ok(())
    }
}

#[derive(Default)]
struct RecordingAuditSink;

impl AuditSink for RecordingAuditSink {
    fn on_transition(&self, _event: &TransitionEvent) {}
    fn on_stage_event(&self, _event: &StageEvent) {}
}

fn sample_index() -> Index {
    Index {
        schema_version: 1,
        digests: "abc".into(),
        tasks: vec![Task {
            id: "T-001".into(),
            title: "build the thing".into(),
            path: "src/thing.rs".into(),
            role: "implementer".into(),
            kind: TaskKind::WorkItem,
            state: TaskState::Open,
            attempts: Attempts::default(),
            retries: Retries::default(),
        }],
    }
}

#[test]
fn open_task_reaches_done_in_one_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut index = sample_index();
    let cfg = Config::default();
    let vcs = CleanVcs;
    let worker = AlwaysSucceedsWorker;
    let role_selector = FirstAvailableRoleSelector;
    let available_roles = vec!["implementer".to_string()];
    let auditor = RecordingAuditSink;

    let deps = RunDeps {
        vcs: &vcs,
        worker: &worker,
        role_selector: &role_selector,
        available_roles: &available_roles,
        auditor: &auditor,
    };

    let result = controller::run(&mut index, dir.path(), &cfg, &deps).unwrap();

    assert_eq!(index.find("T-001").unwrap().state, TaskState::Done);
    assert!(result.resumed_tasks.is_empty());
    assert!(result.blocked_tasks.is_empty());

    let persisted = governator_core::store::load(&dir.path().join(governator_core::store::INDEX_RELATIVE_PATH))
        .unwrap()
        .unwrap();
    assert_eq!(persisted.find("T-001").unwrap().state, TaskState::Done);
}

#[test]
fn worker_failure_in_work_stage_blocks_the_task() {
    struct AlwaysFailsWorker;
    impl WorkerAdapter for AlwaysFailsWorker {
        fn invoke(&self, _ctx: &WorkerContext<'_>) -> governator_core::IngestResult {
            governator_core::IngestResult::blocked("agent exited 1")
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let mut index = sample_index();
    let cfg = Config::default();
    let vcs = CleanVcs;
    let worker = AlwaysFailsWorker;
    let role_selector = FirstAvailableRoleSelector;
    let available_roles = vec!["implementer".to_string()];
    let auditor = RecordingAuditSink;

    let deps = RunDeps {
        vcs: &vcs,
        worker: &worker,
        role_selector: &role_selector,
        available_roles: &available_roles,
        auditor: &auditor,
    };

    controller::run(&mut index, dir.path(), &cfg, &deps).unwrap();
    assert_eq!(index.find("T-001").unwrap().state, TaskState::Blocked);
}

#[test]
fn default_worker_timeout_is_nonzero() {
    let timeout = Duration::from_secs(Config::default().timeouts.worker_seconds);
    assert!(timeout.as_secs() > 0);
}
