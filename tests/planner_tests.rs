// Planner behavior tests - run offline against hand-built recipe tables
use factorio_agent::{
    Action, ActionType, Recipe, RecipeCategory, RecipeDatabase, TaskPlanner, WorldState,
};

fn builtin_planner() -> TaskPlanner {
    TaskPlanner::new(RecipeDatabase::builtin())
}

fn find_action(actions: &[Action], action_type: ActionType, target: &str) -> Option<usize> {
    actions
        .iter()
        .position(|a| a.action_type == action_type && a.target.as_str() == target)
}

#[test]
fn test_raw_item_emits_single_gather_for_deficit() {
    let planner = builtin_planner();
    let mut state = WorldState::new();
    state.inventory.insert("stone".into(), 3);

    let actions = planner.plan_item("stone", 10, &state);

    assert_eq!(actions.len(), 1, "expected exactly one action: {:?}", actions);
    assert_eq!(actions[0].action_type, ActionType::Gather);
    assert_eq!(actions[0].target.as_str(), "stone");
    assert_eq!(actions[0].quantity, 7, "gather should be sized to the deficit");

    println!("✅ Raw deficit gather test passed");
}

#[test]
fn test_satisfied_target_produces_empty_plan() {
    let planner = builtin_planner();
    let mut state = WorldState::new();
    state.inventory.insert("iron-gear-wheel".into(), 5);

    let actions = planner.plan_item("iron-gear-wheel", 3, &state);
    assert!(actions.is_empty(), "already-satisfied goals must produce no actions: {:?}", actions);

    println!("✅ Idempotence test passed");
}

#[test]
fn test_plate_surplus_suppresses_gather_and_smelt() {
    let planner = builtin_planner();
    let mut state = WorldState::new();
    state.inventory.insert("iron-plate".into(), 20);

    let actions = planner.plan_item("iron-plate", 3, &state);

    assert!(
        find_action(&actions, ActionType::Gather, "iron-ore").is_none(),
        "no ore gather expected: {:?}",
        actions
    );
    assert!(
        find_action(&actions, ActionType::Smelt, "iron-plate").is_none(),
        "no smelt expected: {:?}",
        actions
    );
    assert!(actions.is_empty());

    println!("✅ Plate surplus test passed");
}

#[test]
fn test_shared_dependencies_are_additive() {
    // Both parents consume item x; the planned gather must be the sum of
    // net needs, not a double-planned total.
    let recipes = RecipeDatabase::from_recipes(vec![
        Recipe::raw("x"),
        Recipe::new("a", RecipeCategory::Crafting, vec![("x", 2)]),
        Recipe::new("b", RecipeCategory::Crafting, vec![("x", 3)]),
        Recipe::new("c", RecipeCategory::Crafting, vec![("a", 1), ("b", 1)]),
    ]);
    let planner = TaskPlanner::new(recipes);
    let state = WorldState::new();

    let actions = planner.plan_item("c", 1, &state);
    let gather = find_action(&actions, ActionType::Gather, "x")
        .map(|i| &actions[i])
        .expect("a gather for x must be planned");
    assert_eq!(gather.quantity, 5, "x requirement must sum across parents");

    println!("✅ Shared dependency additivity test passed");
}

#[test]
fn test_shared_dependency_inventory_credited_once() {
    // 2 stock of x covers part of the combined demand exactly once.
    let recipes = RecipeDatabase::from_recipes(vec![
        Recipe::raw("x"),
        Recipe::new("a", RecipeCategory::Crafting, vec![("x", 2)]),
        Recipe::new("b", RecipeCategory::Crafting, vec![("x", 3)]),
        Recipe::new("c", RecipeCategory::Crafting, vec![("a", 1), ("b", 1)]),
    ]);
    let planner = TaskPlanner::new(recipes);
    let mut state = WorldState::new();
    state.inventory.insert("x".into(), 2);

    let actions = planner.plan_item("c", 1, &state);
    let gather = find_action(&actions, ActionType::Gather, "x")
        .map(|i| &actions[i])
        .expect("a gather for x must be planned");
    assert_eq!(gather.quantity, 3, "stock must not be credited to both parents");

    println!("✅ Single-credit inventory test passed");
}

#[test]
fn test_burner_mining_drill_scenario() {
    let planner = builtin_planner();
    let state = WorldState::new();

    let actions = planner.plan_item("burner-mining-drill", 1, &state);

    // Quantities
    let ore = find_action(&actions, ActionType::Gather, "iron-ore")
        .map(|i| &actions[i])
        .expect("iron-ore gather expected");
    assert_eq!(ore.quantity, 9, "3 plates for the drill + 6 for 3 gears");

    let stone = find_action(&actions, ActionType::Gather, "stone")
        .map(|i| &actions[i])
        .expect("stone gather expected");
    assert!(stone.quantity >= 5, "at least one furnace worth of stone");

    let smelt_idx = find_action(&actions, ActionType::Smelt, "iron-plate")
        .expect("iron-plate smelt expected");
    assert_eq!(actions[smelt_idx].quantity, 9);
    assert_eq!(
        actions[smelt_idx].extra.get("ore").map(String::as_str),
        Some("iron-ore"),
        "smelt must be tagged with the ore it consumes"
    );

    // Relative order
    let place_idx = find_action(&actions, ActionType::Place, "stone-furnace")
        .expect("furnace placement expected");
    let furnace_craft_idx = find_action(&actions, ActionType::Craft, "stone-furnace")
        .expect("furnace craft expected");
    let gear_idx = find_action(&actions, ActionType::Craft, "iron-gear-wheel")
        .expect("gear craft expected");
    let drill_idx = find_action(&actions, ActionType::Craft, "burner-mining-drill")
        .expect("drill craft expected");

    let stone_idx = find_action(&actions, ActionType::Gather, "stone").unwrap();
    assert!(stone_idx < furnace_craft_idx, "stone before furnace craft");
    assert!(place_idx < smelt_idx, "a furnace must be standing before smelting");
    assert!(smelt_idx < gear_idx, "plates before gears");
    assert!(gear_idx < drill_idx, "gears before the drill");
    assert_eq!(actions[gear_idx].quantity, 3);
    assert_eq!(actions[drill_idx].quantity, 1);
    assert_eq!(
        drill_idx,
        actions.len() - 1,
        "the drill craft is the last action: {:?}",
        actions
    );

    println!("✅ Burner mining drill scenario test passed ({} actions)", actions.len());
}

#[test]
fn test_craft_actions_follow_their_ingredients() {
    let planner = builtin_planner();
    let state = WorldState::new();

    let actions = planner.plan_item("burner-mining-drill", 1, &state);

    for (i, action) in actions.iter().enumerate() {
        if action.action_type != ActionType::Craft {
            continue;
        }
        let recipe = planner
            .recipes()
            .get(action.target.as_str())
            .expect("crafted items have recipes");
        for (ingredient, _) in &recipe.ingredients {
            let produced_before = actions[..i].iter().any(|a| {
                a.target == *ingredient
                    && matches!(
                        a.action_type,
                        ActionType::Gather | ActionType::Smelt | ActionType::Craft
                    )
            });
            assert!(
                produced_before,
                "{} crafted at step {} before its ingredient {} was produced",
                action.target, i, ingredient
            );
        }
    }

    println!("✅ Craft-after-ingredient ordering test passed");
}

#[test]
fn test_unknown_item_degrades_to_gather() {
    let planner = builtin_planner();
    let state = WorldState::new();

    let actions = planner.plan_item("alien-artifact", 2, &state);

    assert_eq!(actions.len(), 1, "unknown item is a best-effort gather: {:?}", actions);
    assert_eq!(actions[0].action_type, ActionType::Gather);
    assert_eq!(actions[0].target.as_str(), "alien-artifact");
    assert_eq!(actions[0].quantity, 2);

    println!("✅ Unknown item fallback test passed");
}

#[test]
fn test_yield_count_rounds_crafts_up() {
    let recipes = RecipeDatabase::from_recipes(vec![
        Recipe::raw("copper-ore"),
        Recipe::new("copper-plate", RecipeCategory::Smelting, vec![("copper-ore", 1)]),
        Recipe::new("copper-cable", RecipeCategory::Crafting, vec![("copper-plate", 1)])
            .with_yield(2),
    ]);
    let planner = TaskPlanner::new(recipes);
    let state = WorldState::new();

    let actions = planner.plan_item("copper-cable", 3, &state);

    let craft = find_action(&actions, ActionType::Craft, "copper-cable")
        .map(|i| &actions[i])
        .expect("cable craft expected");
    assert_eq!(craft.quantity, 2, "3 cables at yield 2 means 2 craft operations");

    let smelt = find_action(&actions, ActionType::Smelt, "copper-plate")
        .map(|i| &actions[i])
        .expect("plate smelt expected");
    assert_eq!(smelt.quantity, 2, "2 crafts consume 2 plates");

    println!("✅ Yield rounding test passed");
}

#[test]
fn test_existing_furnace_skips_bootstrap() {
    use factorio_agent::{PlacedEntity, Position};

    let planner = builtin_planner();
    let mut state = WorldState::new();
    state
        .entities
        .push(PlacedEntity::new("stone-furnace", Position::new(1.0, 1.0)));

    let actions = planner.plan_item("iron-plate", 5, &state);

    assert!(
        find_action(&actions, ActionType::Place, "stone-furnace").is_none(),
        "no placement needed when a furnace is standing: {:?}",
        actions
    );
    assert!(
        find_action(&actions, ActionType::Craft, "stone-furnace").is_none(),
        "no furnace craft needed either"
    );
    assert!(find_action(&actions, ActionType::Smelt, "iron-plate").is_some());

    println!("✅ Existing furnace test passed");
}

#[test]
fn test_pocket_furnace_placed_without_crafting() {
    let planner = builtin_planner();
    let mut state = WorldState::new();
    state.inventory.insert("stone-furnace".into(), 1);

    let actions = planner.plan_item("iron-plate", 5, &state);

    assert!(
        find_action(&actions, ActionType::Place, "stone-furnace").is_some(),
        "the pocket furnace must be placed: {:?}",
        actions
    );
    assert!(
        find_action(&actions, ActionType::Craft, "stone-furnace").is_none(),
        "no craft when one is already in the inventory"
    );

    println!("✅ Pocket furnace test passed");
}

#[test]
fn test_plan_goal_covers_entity_criteria() {
    use factorio_agent::goals::{Goal, GoalStatus};
    use factorio_agent::{PlacedEntity, Position};
    use std::collections::BTreeMap;

    let mut goal = Goal {
        id: "place_furnace".to_string(),
        name: "Place Furnace".to_string(),
        description: String::new(),
        requires: vec![],
        items_required: BTreeMap::new(),
        entities_required: BTreeMap::new(),
        priority: 25,
        category: "building".to_string(),
        estimated_time_seconds: 10,
        status: GoalStatus::Pending,
        attempts: 0,
    };
    goal.entities_required.insert("furnace".into(), 1);

    let planner = builtin_planner();

    // Empty world: craft a stone furnace and place it.
    let state = WorldState::new();
    let actions = planner.plan_goal(&goal, &state);
    assert!(
        find_action(&actions, ActionType::Craft, "stone-furnace").is_some(),
        "the furnace family resolves to a craftable item: {:?}",
        actions
    );
    assert!(find_action(&actions, ActionType::Place, "stone-furnace").is_some());

    // Furnace already standing: nothing to do.
    let mut satisfied = WorldState::new();
    satisfied
        .entities
        .push(PlacedEntity::new("stone-furnace", Position::new(0.0, 0.0)));
    assert!(planner.plan_goal(&goal, &satisfied).is_empty());

    println!("✅ Goal planning test passed");
}

#[test]
fn test_generate_script_contains_skill_calls() {
    let planner = builtin_planner();
    let state = WorldState::new();

    let actions = planner.plan_item("stone-furnace", 1, &state);
    let script = planner.generate_script(&actions);

    assert!(script.contains("gather('stone', 5)"), "script:\n{}", script);
    assert!(script.contains("craft('stone-furnace', 1)"), "script:\n{}", script);
    assert!(script.contains("# Step 1:"));

    println!("✅ Script generation test passed");
}
