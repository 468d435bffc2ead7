//! Core data model (spec §3): tasks, the task index, and the records that
//! flow between the worker adapter, the validation engine, and the resume
//! controller.

use serde::{Deserialize, Serialize};

use crate::state_machine::TaskState;

/// Whether a task is a planning step or ordinary work item (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    Planning,
    WorkItem,
}

/// Attempt counters for a task. Monotonic: never decremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempts {
    pub total: u32,
    pub failed: u32,
}

/// Per-task retry policy override. `max_attempts == 0` means "inherit the
/// global default" (spec §4.6).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retries {
    pub max_attempts: u32,
}

impl Retries {
    /// Resolves the effective attempt cap given a global default.
    #[must_use]
    pub fn effective_max_attempts(self, global_default: u32) -> u32 {
        if self.max_attempts > 0 {
            self.max_attempts
        } else if global_default > 0 {
            global_default
        } else {
            3
        }
    }
}

/// A unit of agent work with an identity, a role, a lifecycle state, and a
/// directory on disk (see GLOSSARY).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub path: String,
    pub role: String,
    pub kind: TaskKind,
    pub state: TaskState,
    pub attempts: Attempts,
    #[serde(default)]
    pub retries: Retries,
}

/// The sole durable truth: a versioned document of tasks (spec §3, §4.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    pub schema_version: u32,
    /// Content fingerprint of the planning spec, used to detect drift.
    pub digests: String,
    pub tasks: Vec<Task>,
}

impl Index {
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Tasks currently in `state`, in index order.
    pub fn in_state(&self, state: TaskState) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.state == state)
    }
}

/// A blocked task whose preserved worktree makes it eligible for resume
/// (spec §3, §4.6). Derived state; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeCandidate {
    pub task_id: String,
    pub worktree_path: std::path::PathBuf,
    pub attempt: u32,
}

/// The worker-adapter -> stage-executor contract (spec §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestResult {
    pub success: bool,
    pub new_state: Option<TaskState>,
    pub block_reason: Option<String>,
    pub timed_out: bool,
}

impl IngestResult {
    #[must_use]
    pub fn success(new_state: TaskState) -> Self {
        Self {
            success: true,
            new_state: Some(new_state),
            block_reason: None,
            timed_out: false,
        }
    }

    #[must_use]
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            new_state: Some(TaskState::Blocked),
            block_reason: Some(reason.into()),
            timed_out: false,
        }
    }

    #[must_use]
    pub fn timed_out(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            new_state: Some(TaskState::Blocked),
            block_reason: Some(reason.into()),
            timed_out: true,
        }
    }
}

/// A single transition audit record (spec §4.1, §6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub task_id: String,
    pub role: String,
    pub old: TaskState,
    pub new: TaskState,
}
