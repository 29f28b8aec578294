// Factory Autonomous Agent Library
// Goal-driven planning over an external factory simulation

pub mod models;
pub mod environment;
pub mod operations;
pub mod goals;
pub mod storage;
pub mod foreman;
pub mod config;
pub mod verbosity;
pub mod output_broker;

// Re-export commonly used types
pub use models::{
    Action, ActionType, ItemKey, Observation, PlacedEntity, Position, PowerStatus, Recipe,
    RecipeCategory, ResourceKind, WorldState,
};

pub use environment::{FactoryEnvironment, FeedbackParser, HttpEnvironment, SkillCall};
pub use foreman::{CycleOutcome, Foreman};
pub use goals::{Goal, GoalManager, GoalSelection, GoalStatus};
pub use operations::{StateTracker, TaskPlanner};
pub use storage::RecipeDatabase;
pub use config::{ConfigManager, FactoryConfig};

// Constants
pub const DEFAULT_CONFIG_FILE: &str = "factorio_agent.toml";
