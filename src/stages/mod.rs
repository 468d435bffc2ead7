//! Stage executors (spec §4.3): one per pipeline stage, all following the
//! same filter → dispatch → write-back → emit template. [`run_stage`] is
//! that template, generalized over the closure that decides each task's
//! outcome; the resolve and branch stages deviate enough (role indirection,
//! no state transition) that they implement their own loops instead of
//! reusing it.

pub mod branch;
pub mod merge;
pub mod resolve;
pub mod review;
pub mod test_stage;
pub mod work;

use governator_core::{store, AuditSink, CoreError, Index, StageEvent, TaskState};

/// Report of whether a stage mutated the in-memory index.
#[derive(Debug, Default, Clone, Copy)]
pub struct StageRunReport {
    pub mutated: bool,
}

/// The desired write-back for one task, before it's checked against the
/// transition table.
pub enum StageResult {
    /// Move the task to `TaskState`.
    NextState(TaskState),
    /// An agent or environmental failure; write back `blocked` with reason.
    Blocked(String),
    /// The worker adapter reported a timeout; write back `blocked`.
    Timeout(String),
}

/// Runs the filter → dispatch → write-back → emit template for one stage.
///
/// `operation` computes the [`StageResult`] for a single task without
/// mutating `index`'s state field itself — only this function calls
/// `transition_state`, so "on mapping failure, force blocked" (spec §4.3
/// step 4) has one implementation, not six.
pub fn run_stage<F>(
    index: &mut Index,
    auditor: &dyn AuditSink,
    stage_name: &'static str,
    input_state: TaskState,
    mut operation: F,
) -> Result<StageRunReport, CoreError>
where
    F: FnMut(&Index, &str) -> StageResult,
{
    let task_ids: Vec<String> = index.in_state(input_state).map(|t| t.id.clone()).collect();
    let mut mutated = false;

    for id in task_ids {
        let role = index.find(&id).map_or_else(String::new, |t| t.role.clone());
        auditor.on_stage_event(&StageEvent::TaskStart {
            task_id: id.clone(),
            role,
            stage: stage_name.to_string(),
        });

        let (desired, timed_out, failure_reason) = match operation(index, &id) {
            StageResult::NextState(state) => (state, false, None),
            StageResult::Blocked(reason) => (TaskState::Blocked, false, Some(reason)),
            StageResult::Timeout(reason) => (TaskState::Blocked, true, Some(reason)),
        };

        match store::transition_state(index, &id, desired, auditor) {
            Ok(()) => mutated = true,
            Err(_mapping_failure) => {
                store::transition_state(index, &id, TaskState::Blocked, auditor)?;
                mutated = true;
            }
        }

        if timed_out {
            auditor.on_stage_event(&StageEvent::TaskTimeout { task_id: id.clone(), stage: stage_name.to_string() });
        } else if let Some(reason) = failure_reason {
            auditor.on_stage_event(&StageEvent::TaskFailure { task_id: id.clone(), stage: stage_name.to_string(), reason });
        } else {
            auditor.on_stage_event(&StageEvent::TaskComplete { task_id: id.clone(), stage: stage_name.to_string() });
        }
    }

    Ok(StageRunReport { mutated })
}
