//! The task index store (spec §4.1): load/save the versioned index document
//! and its two mutators, `increment_task_attempt` and `transition_state`.
//!
//! Persistence is atomic: write to a temp file beside the destination,
//! `fsync`, then `rename`. POSIX rename within the same directory is atomic,
//! so the file on disk is always either the previous committed version or
//! the new one, never a torn write.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::audit::AuditSink;
use crate::error::CoreError;
use crate::models::{Index, TransitionEvent};
use crate::state_machine::TaskState;

/// Relative path of the task index file under the repo root (spec §6).
pub const INDEX_RELATIVE_PATH: &str = "_governator/task-index.json";

/// Loads the index from `path`. Returns `Ok(None)` if the file does not
/// exist yet (a fresh repo with no prior run).
pub fn load(path: &Path) -> Result<Option<Index>, CoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Writes `index` to `path` atomically: temp file in the same directory,
/// `fsync`, then `rename`.
pub fn save_atomic(index: &Index, path: &Path) -> Result<(), CoreError> {
    let json = serde_json::to_vec_pretty(index)?;
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let tmp_path = dir.join(".task-index.json.tmp");
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(&json)?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Increments `Attempts.Total` for the task with `id`. Errors if absent.
pub fn increment_task_attempt(index: &mut Index, id: &str) -> Result<(), CoreError> {
    let task = index
        .find_mut(id)
        .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
    task.attempts.total += 1;
    Ok(())
}

/// Validates and applies an in-memory state transition, emitting an audit
/// event. Performs no disk I/O (spec §4.1).
pub fn transition_state(
    index: &mut Index,
    id: &str,
    next: TaskState,
    auditor: &dyn AuditSink,
) -> Result<(), CoreError> {
    let task = index
        .find_mut(id)
        .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
    let old = task.state;
    if !old.can_transition_to(next) {
        return Err(CoreError::IllegalTransition {
            task_id: id.to_string(),
            from: old,
            to: next,
        });
    }
    task.state = next;
    let role = task.role.clone();
    auditor.on_transition(&TransitionEvent {
        task_id: id.to_string(),
        role,
        old,
        new: next,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::NullAuditSink;
    use crate::models::{Attempts, Retries, Task, TaskKind};

    fn sample_index() -> Index {
        Index {
            schema_version: 1,
            digests: "abc".into(),
            tasks: vec![Task {
                id: "T-1".into(),
                title: "t".into(),
                path: "p".into(),
                role: "implementer".into(),
                kind: TaskKind::WorkItem,
                state: TaskState::Open,
                attempts: Attempts::default(),
                retries: Retries::default(),
            }],
        }
    }

    #[test]
    fn increment_attempt_errors_on_missing_task() {
        let mut idx = sample_index();
        let err = increment_task_attempt(&mut idx, "T-missing").unwrap_err();
        assert!(matches!(err, CoreError::TaskNotFound(_)));
    }

    #[test]
    fn increment_attempt_is_monotonic() {
        let mut idx = sample_index();
        increment_task_attempt(&mut idx, "T-1").unwrap();
        increment_task_attempt(&mut idx, "T-1").unwrap();
        assert_eq!(idx.find("T-1").unwrap().attempts.total, 2);
    }

    #[test]
    fn transition_rejects_illegal_moves_without_mutating_state() {
        let mut idx = sample_index();
        let sink = NullAuditSink;
        let err = transition_state(&mut idx, "T-1", TaskState::Done, &sink).unwrap_err();
        assert!(matches!(err, CoreError::IllegalTransition { .. }));
        assert_eq!(idx.find("T-1").unwrap().state, TaskState::Open);
    }

    #[test]
    fn transition_applies_legal_move() {
        let mut idx = sample_index();
        let sink = NullAuditSink;
        transition_state(&mut idx, "T-1", TaskState::Worked, &sink).unwrap();
        assert_eq!(idx.find("T-1").unwrap().state, TaskState::Worked);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_governator/task-index.json");
        let idx = sample_index();
        save_atomic(&idx, &path).unwrap();
        let loaded = load(&path).unwrap().unwrap();
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].id, "T-1");
    }

    #[test]
    fn load_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_governator/task-index.json");
        assert!(load(&path).unwrap().is_none());
    }
}
