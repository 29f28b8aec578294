// Goal manager selection tests - offline against hand-built trees
use factorio_agent::goals::{Goal, GoalManager, GoalSelection, GoalStatus};
use factorio_agent::{PlacedEntity, Position, WorldState};
use std::collections::BTreeMap;

fn goal(id: &str, requires: &[&str], items: &[(&str, u32)], priority: u32) -> Goal {
    Goal {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        requires: requires.iter().map(|r| r.to_string()).collect(),
        items_required: items.iter().map(|(n, c)| ((*n).into(), *c)).collect(),
        entities_required: BTreeMap::new(),
        priority,
        category: "general".to_string(),
        estimated_time_seconds: 60,
        status: GoalStatus::Pending,
        attempts: 0,
    }
}

fn expect_work(selection: GoalSelection) -> Goal {
    match selection {
        GoalSelection::Work(goal) => goal,
        other => panic!("expected a workable goal, got {:?}", other),
    }
}

#[test]
fn test_prerequisites_gate_candidates() {
    let tree = vec![
        goal("a", &[], &[("stone", 5)], 10),
        goal("b", &["a"], &[("stone-furnace", 1)], 90),
    ];
    let mut manager = GoalManager::new("b", tree);
    let state = WorldState::new();

    let selected = expect_work(manager.get_current_goal(&state));
    assert_eq!(selected.id, "a", "b's prerequisite is not complete, so only a is workable");
    assert_eq!(
        selected.target_item().map(|k| k.as_str()),
        Some("stone"),
        "the goal's primary item is its first criterion"
    );

    println!("✅ Prerequisite gating test passed");
}

#[test]
fn test_opportunistic_completion() {
    let tree = vec![
        goal("a", &[], &[("stone", 5)], 10),
        goal("b", &["a"], &[("stone-furnace", 1)], 20),
    ];
    let mut manager = GoalManager::new("b", tree);

    // The world already satisfies a, even though it was never worked on.
    let mut state = WorldState::new();
    state.inventory.insert("stone".into(), 7);

    let selected = expect_work(manager.get_current_goal(&state));
    assert_eq!(selected.id, "b", "a completed opportunistically, b becomes workable");
    assert_eq!(manager.goal("a").unwrap().status, GoalStatus::Completed);

    println!("✅ Opportunistic completion test passed");
}

#[test]
fn test_target_completion_is_terminal() {
    let tree = vec![goal("a", &[], &[("stone", 5)], 10)];
    let mut manager = GoalManager::new("a", tree);

    let mut state = WorldState::new();
    state.inventory.insert("stone".into(), 5);

    assert!(matches!(
        manager.get_current_goal(&state),
        GoalSelection::Complete
    ));
    assert!(manager.is_complete());

    println!("✅ Terminal completion test passed");
}

#[test]
fn test_three_failures_exclude_goal_permanently() {
    let tree = vec![goal("a", &[], &[("stone", 5)], 10)];
    let mut manager = GoalManager::new("a", tree);
    let state = WorldState::new();

    // Two failures: still retryable.
    manager.mark_failed("a");
    manager.mark_failed("a");
    let selected = expect_work(manager.get_current_goal(&state));
    assert_eq!(selected.id, "a");

    // Third failure: permanently excluded, so the tree is stuck.
    manager.mark_failed("a");
    assert!(matches!(manager.get_current_goal(&state), GoalSelection::Stuck));
    assert_eq!(manager.goal("a").unwrap().status, GoalStatus::Failed);

    println!("✅ Three-strike exclusion test passed");
}

#[test]
fn test_failed_prerequisite_blocks_branch() {
    let tree = vec![
        goal("a", &[], &[("stone", 5)], 10),
        goal("b", &["a"], &[("stone-furnace", 1)], 20),
    ];
    let mut manager = GoalManager::new("b", tree);
    let state = WorldState::new();

    for _ in 0..3 {
        manager.mark_failed("a");
    }

    // b's prerequisite can never be met: permanent stuck report, and b is
    // never offered as a candidate.
    assert!(matches!(manager.get_current_goal(&state), GoalSelection::Stuck));
    assert!(matches!(manager.get_current_goal(&state), GoalSelection::Stuck));
    assert_eq!(manager.goal("b").unwrap().status, GoalStatus::Blocked);

    println!("✅ Blocked branch test passed");
}

#[test]
fn test_on_path_goals_outrank_priority() {
    let tree = vec![
        goal("prep", &[], &[("stone", 5)], 10),
        goal("detour", &[], &[("wood", 5)], 90),
        goal("target", &["prep"], &[("stone-furnace", 1)], 50),
    ];
    let mut manager = GoalManager::new("target", tree);
    let state = WorldState::new();

    let selected = expect_work(manager.get_current_goal(&state));
    assert_eq!(
        selected.id, "prep",
        "a low-priority goal on the critical path beats a high-priority detour"
    );

    println!("✅ Critical path ranking test passed");
}

#[test]
fn test_priority_ranks_within_tier() {
    let tree = vec![
        goal("low", &[], &[("stone", 5)], 10),
        goal("high", &[], &[("coal", 5)], 40),
        goal("target", &["low", "high"], &[("stone-furnace", 1)], 50),
    ];
    let mut manager = GoalManager::new("target", tree);
    let state = WorldState::new();

    let selected = expect_work(manager.get_current_goal(&state));
    assert_eq!(selected.id, "high", "both on path, higher priority wins");

    println!("✅ Priority tier test passed");
}

#[test]
fn test_declaration_order_breaks_ties() {
    let tree = vec![
        goal("first", &[], &[("stone", 5)], 30),
        goal("second", &[], &[("coal", 5)], 30),
        goal("target", &["first", "second"], &[("stone-furnace", 1)], 50),
    ];
    let mut manager = GoalManager::new("target", tree);
    let state = WorldState::new();

    let selected = expect_work(manager.get_current_goal(&state));
    assert_eq!(selected.id, "first", "equal rank falls back to declaration order");

    println!("✅ Declaration order tie-break test passed");
}

#[test]
fn test_selection_never_returns_unmet_prerequisites() {
    let tree = vec![
        goal("a", &[], &[("stone", 5)], 10),
        goal("b", &["a"], &[("coal", 5)], 80),
        goal("c", &["b"], &[("wood", 5)], 90),
    ];
    let mut manager = GoalManager::new("c", tree.clone());

    let mut state = WorldState::new();
    loop {
        let selected = match manager.get_current_goal(&state) {
            GoalSelection::Work(goal) => goal,
            _ => break,
        };
        for req in &selected.requires {
            assert_eq!(
                manager.goal(req).unwrap().status,
                GoalStatus::Completed,
                "{} offered before its prerequisite {} completed",
                selected.id,
                req
            );
        }
        // Satisfy the goal and go around.
        for (item, count) in &selected.items_required {
            state.inventory.insert(item.clone(), *count);
        }
    }
    assert!(manager.is_complete());

    println!("✅ Prerequisite invariant test passed");
}

#[test]
fn test_entity_criteria_checked_against_world() {
    let mut tree = vec![goal("place_furnace", &[], &[], 10)];
    tree[0]
        .entities_required
        .insert("furnace".into(), 1);
    let mut manager = GoalManager::new("place_furnace", tree);

    let mut state = WorldState::new();
    assert!(matches!(
        manager.get_current_goal(&state),
        GoalSelection::Work(_)
    ));

    // Any furnace-family entity satisfies the criterion.
    state
        .entities
        .push(PlacedEntity::new("stone-furnace", Position::new(0.0, 0.0)));
    assert!(matches!(
        manager.get_current_goal(&state),
        GoalSelection::Complete
    ));

    println!("✅ Entity criterion test passed");
}

#[test]
fn test_progress_tracks_target_closure() {
    let tree = vec![
        goal("a", &[], &[("stone", 5)], 10),
        goal("b", &["a"], &[("coal", 5)], 20),
        goal("offpath", &[], &[("wood", 99)], 5),
    ];
    let mut manager = GoalManager::new("b", tree);

    let mut state = WorldState::new();
    state.inventory.insert("stone".into(), 5);
    let _ = manager.get_current_goal(&state);

    let progress = manager.progress();
    assert_eq!(progress.total_goals, 2, "off-path goals don't count toward the target");
    assert_eq!(progress.completed_goals, 1);
    assert_eq!(progress.remaining, vec!["b".to_string()]);

    println!("✅ Progress reporting test passed");
}
