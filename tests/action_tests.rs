// Action rendering tests - one rule per action type, no-ops never crash
use factorio_agent::{Action, ActionType, ItemKey, Position};

#[test]
fn test_gather_and_craft_render() {
    let gather = Action::new(ActionType::Gather, "stone", 5).to_skill_call();
    assert_eq!(gather.to_string(), "gather('stone', 5)");

    let craft = Action::new(ActionType::Craft, "iron-gear-wheel", 3).to_skill_call();
    assert_eq!(craft.to_string(), "craft('iron-gear-wheel', 3)");

    println!("✅ Gather/craft rendering test passed");
}

#[test]
fn test_place_renders_with_and_without_position() {
    let bare = Action::new(ActionType::Place, "stone-furnace", 1).to_skill_call();
    assert_eq!(bare.to_string(), "place('stone-furnace')");

    let positioned = Action::new(ActionType::Place, "stone-furnace", 1)
        .at(Position::new(3.0, -2.0))
        .to_skill_call();
    assert_eq!(positioned.to_string(), "place('stone-furnace', 3.0, -2.0)");

    println!("✅ Place rendering test passed");
}

#[test]
fn test_smelt_renders_with_ore_tag() {
    let call = Action::new(ActionType::Smelt, "iron-plate", 9)
        .with_extra("ore", "iron-ore")
        .to_skill_call();
    assert_eq!(call.to_string(), "smelt('iron-ore', 'iron-plate', 9)");

    // An untagged smelt still renders something executable.
    let untagged = Action::new(ActionType::Smelt, "iron-plate", 9).to_skill_call();
    assert_eq!(untagged.to_string(), "smelt('iron-ore', 'iron-plate', 9)");

    println!("✅ Smelt rendering test passed");
}

#[test]
fn test_move_requires_position() {
    let ok = Action::new(ActionType::Move, "player", 1)
        .at(Position::new(12.5, 7.0))
        .to_skill_call();
    assert_eq!(ok.to_string(), "move_to(12.5, 7.0)");

    let missing = Action::new(ActionType::Move, "player", 1).to_skill_call();
    assert!(missing.is_noop(), "a move without coordinates must be a detectable no-op");
    assert!(missing.to_string().starts_with("# noop:"));

    println!("✅ Move rendering test passed");
}

#[test]
fn test_insert_and_extract_require_entity() {
    let insert = Action::new(ActionType::Insert, "coal", 5)
        .with_extra("entity", "stone-furnace")
        .to_skill_call();
    assert_eq!(insert.to_string(), "insert_item('coal', 'stone-furnace', 5)");

    let extract = Action::new(ActionType::Extract, "iron-plate", 9)
        .with_extra("entity", "stone-furnace")
        .to_skill_call();
    assert_eq!(extract.to_string(), "extract_item('iron-plate', 'stone-furnace', 9)");

    let incomplete = Action::new(ActionType::Insert, "coal", 5).to_skill_call();
    assert!(incomplete.is_noop());

    println!("✅ Insert/extract rendering test passed");
}

#[test]
fn test_wait_renders_to_sleep() {
    let call = Action::new(ActionType::Wait, "player", 10).to_skill_call();
    assert_eq!(call.to_string(), "sleep(10)");
    assert!(!call.is_noop());

    println!("✅ Wait rendering test passed");
}

#[test]
fn test_target_names_normalize_on_construction() {
    let action = Action::new(ActionType::Gather, "Iron_Ore", 4);
    assert_eq!(action.target.as_str(), "iron-ore");
    assert_eq!(action.to_skill_call().to_string(), "gather('iron-ore', 4)");

    println!("✅ Action name normalization test passed");
}

#[test]
fn test_item_key_families() {
    let furnace = ItemKey::new("stone-furnace");
    assert!(furnace.in_family(&ItemKey::new("furnace")));
    assert!(!furnace.in_family(&ItemKey::new("drill")));
    assert_eq!(ItemKey::new("  Burner Mining_Drill "), ItemKey::new("burner-mining-drill"));

    println!("✅ Item key family test passed");
}
