//! The worker adapter (spec §2 item 5, §6): stages a workspace, invokes the
//! external agent subprocess, and ingests its result into an `IngestResult`.
//!
//! Subprocess invocation follows the teacher's pattern of shelling out with
//! `std::process::Command` and mapping a non-zero exit to a typed error;
//! timeout enforcement is layered on top by running the wait on a helper
//! thread and racing it against a deadline.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::mpsc;
use std::time::Duration;

use governator_core::{IngestResult, Task};

/// Everything the worker needs to run one stage for one task (spec §6).
pub struct WorkerContext<'a> {
    pub repo_root: &'a Path,
    pub worktree_root: PathBuf,
    pub task: &'a Task,
    pub stage: &'static str,
    pub role: String,
    pub timeout: Duration,
}

/// Raw result of running the worker subprocess, before ingestion.
struct WorkerExecution {
    success: bool,
    stdout: String,
    stderr: String,
}

/// Invokes agent subprocesses on behalf of a stage executor.
pub trait WorkerAdapter {
    /// Runs the worker for `ctx`; returns the `IngestResult` the stage
    /// executor should map to a next state.
    fn invoke(&self, ctx: &WorkerContext<'_>) -> IngestResult;
}

/// A [`WorkerAdapter`] that runs `command` (e.g. the agent CLI) via
/// `bash -lc` in the worktree, enforcing `ctx.timeout`.
pub struct SubprocessWorkerAdapter {
    pub command: String,
}

impl WorkerAdapter for SubprocessWorkerAdapter {
    fn invoke(&self, ctx: &WorkerContext<'_>) -> IngestResult {
        match run_with_timeout(&ctx.worktree_root, &self.command, ctx.timeout) {
            Ok(WorkerTimedOut) => IngestResult::timed_out(format!(
                "worker for task {} exceeded {:?}",
                ctx.task.id, ctx.timeout
            )),
            Err(execution) if execution.success => IngestResult {
                success: true,
                new_state: None,
                block_reason: None,
                timed_out: false,
            },
            Err(execution) => IngestResult::blocked(format!(
                "worker exited non-zero for task {}: {}",
                ctx.task.id,
                execution.stderr.trim()
            )),
        }
    }
}

/// Marker returned when the deadline elapsed before the subprocess exited.
struct WorkerTimedOut;

fn run_with_timeout(dir: &Path, command: &str, timeout: Duration) -> Result<WorkerTimedOut, WorkerExecution> {
    let (tx, rx) = mpsc::channel();
    let dir = dir.to_path_buf();
    let command = command.to_string();
    std::thread::spawn(move || {
        let output = Command::new("bash").arg("-lc").arg(&command).current_dir(&dir).output();
        let _ = tx.send(output);
    });
    match rx.recv_timeout(timeout) {
        Ok(Ok(output)) => Err(WorkerExecution {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }),
        Ok(Err(io_err)) => Err(WorkerExecution {
            success: false,
            stdout: String::new(),
            stderr: format!("failed to spawn worker: {io_err}"),
        }),
        Err(mpsc::RecvTimeoutError::Timeout) => Ok(WorkerTimedOut),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(WorkerExecution {
            success: false,
            stdout: String::new(),
            stderr: "worker thread disconnected without a result".to_string(),
        }),
    }
}
