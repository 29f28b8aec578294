// Goals module - declarative goal tree and selection logic
pub mod goal_manager;
pub mod goal_types;

pub use goal_manager::{GoalManager, GoalProgress};
pub use goal_types::Goal;

/// Per-goal state machine: Pending -> InProgress -> {Completed | Blocked |
/// Failed}. Failed returns to Pending while attempts remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatus {
    Pending,
    InProgress,
    Completed,
    Blocked,
    Failed,
}

/// Outcome of asking the manager what to do next. Stuck is a value, not an
/// error: the tree has unfinished goals but none of them can be worked.
#[derive(Debug, Clone)]
pub enum GoalSelection {
    Work(Goal),
    Complete,
    Stuck,
}

impl GoalSelection {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GoalSelection::Work(_))
    }
}
