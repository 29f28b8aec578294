// Operations module - planning and state-tracking logic

pub mod state_tracker;
pub mod task_planner;

pub use state_tracker::{StateSnapshot, StateTracker, DEFAULT_HISTORY_CAPACITY};
pub use task_planner::TaskPlanner;
