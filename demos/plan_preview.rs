// Offline plan preview example
use factorio_agent::{RecipeDatabase, TaskPlanner, WorldState};

fn main() {
    println!("🔍 Factory Agent Plan Preview");

    // No simulation server needed: plan against the shipped recipe table
    // (or the built-in fallback when data/recipes.json is absent).
    let recipes = RecipeDatabase::load("data/recipes.json");
    println!("📖 Recipe table: {} entries\n", recipes.len());

    let planner = TaskPlanner::new(recipes);

    // Fresh start: empty inventory, nothing placed.
    let state = WorldState::new();

    let target = std::env::args().nth(1).unwrap_or_else(|| "burner-mining-drill".to_string());
    let actions = planner.plan_item(&target, 1, &state);

    println!("🎯 Plan for 1x {} from an empty world:", target);
    println!("{}", planner.generate_script(&actions));

    // Same plan with a head start - watch it shrink.
    let mut stocked = WorldState::new();
    stocked.inventory.insert("iron-plate".into(), 20);
    stocked.inventory.insert("stone".into(), 10);

    let actions = planner.plan_item(&target, 1, &stocked);
    println!("🎯 Same plan with 20 iron plates and 10 stone on hand:");
    println!("{}", planner.generate_script(&actions));
}
