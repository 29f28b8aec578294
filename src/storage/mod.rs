// Storage module for static tables loaded at startup
pub mod goal_store;
pub mod recipe_db;

pub use goal_store::{default_goal_tree, load_goal_tree};
pub use recipe_db::RecipeDatabase;
