//! The task lifecycle state machine (spec §4.2).
//!
//! `blocked -> open` is reachable only through the resume controller's
//! `IncrementAttempt` + `TransitionState` pair, never through an ordinary
//! stage executor write-back; callers that need that edge should go through
//! `governator`'s resume module rather than calling
//! [`TaskState::can_transition_to`] directly and assuming it's always legal
//! to take.

use serde::{Deserialize, Serialize};

/// A task's position in the lifecycle (spec §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Open,
    Worked,
    Tested,
    Reviewed,
    Conflict,
    Resolved,
    Done,
    Blocked,
}

impl TaskState {
    /// Returns the states this state may legally transition to.
    #[must_use]
    pub fn valid_transitions(self) -> &'static [TaskState] {
        use TaskState::{Blocked, Conflict, Done, Open, Resolved, Reviewed, Tested, Worked};
        match self {
            TaskState::Open => &[Worked, Blocked],
            TaskState::Worked => &[Tested, Blocked],
            TaskState::Tested => &[Reviewed, Done, Conflict, Blocked],
            TaskState::Reviewed => &[Done, Conflict, Blocked],
            TaskState::Conflict => &[Resolved, Blocked],
            TaskState::Resolved => &[Done, Conflict, Blocked],
            TaskState::Done => &[],
            TaskState::Blocked => &[Open],
        }
    }

    /// Returns whether `self -> next` is a legal transition.
    #[must_use]
    pub fn can_transition_to(self, next: TaskState) -> bool {
        self.valid_transitions().contains(&next)
    }

    /// Returns whether this state has no outgoing transitions in normal
    /// stage processing. `blocked` is excluded: it is terminal for stage
    /// executors but recoverable by the resume controller.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::TaskState::*;

    #[test]
    fn open_can_move_to_worked_or_blocked() {
        assert!(Open.can_transition_to(Worked));
        assert!(Open.can_transition_to(Blocked));
        assert!(!Open.can_transition_to(Done));
    }

    #[test]
    fn tested_allows_all_four_named_edges() {
        for s in [Reviewed, Done, Conflict, Blocked] {
            assert!(Tested.can_transition_to(s));
        }
        assert!(!Tested.can_transition_to(Resolved));
    }

    #[test]
    fn blocked_only_resumes_to_open() {
        assert_eq!(Blocked.valid_transitions(), &[Open]);
    }

    #[test]
    fn done_is_terminal_with_no_outgoing_edges() {
        assert!(Done.valid_transitions().is_empty());
        assert!(Done.is_terminal());
    }

    #[test]
    fn resolved_can_reenter_conflict_or_block() {
        assert!(Resolved.can_transition_to(Conflict));
        assert!(Resolved.can_transition_to(Blocked));
        assert!(Resolved.can_transition_to(Done));
    }
}
