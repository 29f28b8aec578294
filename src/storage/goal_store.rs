// Goal tree storage - loads the declarative goal table
use crate::goals::{Goal, GoalStatus};
use crate::models::ItemKey;
use crate::{o_debug, o_error};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;

// On-disk shape: {"goals": [{"id": "...", "name": "...", ...}, ...]}.
// An ordered array, not a map: declaration order is the documented
// tie-break for equally ranked goals.
#[derive(Debug, Deserialize)]
struct GoalFile {
    #[serde(default)]
    goals: Vec<GoalEntry>,
}

#[derive(Debug, Deserialize)]
struct GoalEntry {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    requires: Vec<String>,
    #[serde(default)]
    items_required: HashMap<String, u32>,
    #[serde(default)]
    entities_required: HashMap<String, u32>,
    #[serde(default = "default_priority")]
    priority: u32,
    #[serde(default = "default_goal_category")]
    category: String,
    #[serde(default = "default_estimated_time")]
    estimated_time: u64,
}

fn default_priority() -> u32 {
    50
}

fn default_goal_category() -> String {
    "general".to_string()
}

fn default_estimated_time() -> u64 {
    60
}

/// Load the goal tree from disk, falling back to the built-in early-game
/// progression tree when the file is missing or malformed.
pub fn load_goal_tree(path: &str) -> Vec<Goal> {
    match load_file(path) {
        Ok(goals) => {
            o_debug!("🎯 Loaded {} goals from {}", goals.len(), path);
            goals
        }
        Err(e) => {
            o_error!("⚠️ Could not load goal tree from {}: {}", path, e);
            o_error!("🎯 Falling back to built-in goal tree");
            default_goal_tree()
        }
    }
}

fn load_file(path: &str) -> Result<Vec<Goal>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let file: GoalFile = serde_json::from_str(&content)?;

    if file.goals.is_empty() {
        return Err(format!("goal file {} contains no goals", path).into());
    }

    Ok(file.goals.into_iter().map(goal_from_entry).collect())
}

fn goal_from_entry(entry: GoalEntry) -> Goal {
    let name = if entry.name.is_empty() {
        entry.id.clone()
    } else {
        entry.name
    };
    Goal {
        id: entry.id,
        name,
        description: entry.description,
        requires: entry.requires,
        items_required: to_criteria(entry.items_required),
        entities_required: to_criteria(entry.entities_required),
        priority: entry.priority,
        category: entry.category,
        estimated_time_seconds: entry.estimated_time,
        status: GoalStatus::Pending,
        attempts: 0,
    }
}

fn to_criteria(raw: HashMap<String, u32>) -> BTreeMap<ItemKey, u32> {
    raw.into_iter()
        .map(|(name, count)| (ItemKey::new(&name), count))
        .collect()
}

/// The built-in early-game progression: raw gathering through the first
/// automated miner, steam power and red science.
pub fn default_goal_tree() -> Vec<Goal> {
    fn goal(
        id: &str,
        name: &str,
        description: &str,
        requires: &[&str],
        items: &[(&str, u32)],
        entities: &[(&str, u32)],
        priority: u32,
        category: &str,
        estimated_time_seconds: u64,
    ) -> Goal {
        Goal {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            requires: requires.iter().map(|r| r.to_string()).collect(),
            items_required: items
                .iter()
                .map(|(n, c)| (ItemKey::new(n), *c))
                .collect(),
            entities_required: entities
                .iter()
                .map(|(n, c)| (ItemKey::new(n), *c))
                .collect(),
            priority,
            category: category.to_string(),
            estimated_time_seconds,
            status: GoalStatus::Pending,
            attempts: 0,
        }
    }

    vec![
        goal(
            "gather_stone",
            "Gather Stone",
            "Collect stone for basic crafting",
            &[],
            &[("stone", 10)],
            &[],
            10,
            "raw",
            30,
        ),
        goal(
            "gather_coal",
            "Gather Coal",
            "Collect coal for fuel",
            &[],
            &[("coal", 10)],
            &[],
            10,
            "raw",
            30,
        ),
        goal(
            "gather_iron_ore",
            "Gather Iron Ore",
            "Collect iron ore for smelting",
            &[],
            &[("iron-ore", 20)],
            &[],
            10,
            "raw",
            30,
        ),
        goal(
            "gather_copper_ore",
            "Gather Copper Ore",
            "Collect copper ore for smelting",
            &[],
            &[("copper-ore", 10)],
            &[],
            10,
            "raw",
            30,
        ),
        goal(
            "craft_furnace",
            "Craft Stone Furnace",
            "Build the first furnace for smelting",
            &["gather_stone"],
            &[("stone-furnace", 1)],
            &[],
            20,
            "crafting",
            15,
        ),
        goal(
            "place_furnace",
            "Place Furnace",
            "Place a furnace in the world",
            &["craft_furnace"],
            &[],
            &[("furnace", 1)],
            25,
            "building",
            10,
        ),
        goal(
            "smelt_iron",
            "Smelt Iron Plates",
            "Produce iron plates from ore",
            &["place_furnace", "gather_iron_ore", "gather_coal"],
            &[("iron-plate", 10)],
            &[],
            30,
            "smelting",
            60,
        ),
        goal(
            "smelt_copper",
            "Smelt Copper Plates",
            "Produce copper plates from ore",
            &["place_furnace", "gather_copper_ore", "gather_coal"],
            &[("copper-plate", 5)],
            &[],
            30,
            "smelting",
            60,
        ),
        goal(
            "craft_gears",
            "Craft Iron Gear Wheels",
            "Make gears for machinery",
            &["smelt_iron"],
            &[("iron-gear-wheel", 6)],
            &[],
            35,
            "crafting",
            20,
        ),
        goal(
            "craft_burner_drill",
            "Craft Burner Mining Drill",
            "Build the first automated miner",
            &["craft_furnace", "smelt_iron", "craft_gears"],
            &[("burner-mining-drill", 1)],
            &[],
            50,
            "automation",
            30,
        ),
        goal(
            "place_burner_drill",
            "Place Burner Drill on Iron",
            "Set up automated iron mining",
            &["craft_burner_drill"],
            &[],
            &[("burner-mining-drill", 1)],
            55,
            "automation",
            20,
        ),
        goal(
            "craft_boiler",
            "Craft Boiler",
            "Build a boiler for steam power",
            &["craft_furnace", "smelt_iron"],
            &[("boiler", 1)],
            &[],
            45,
            "power",
            30,
        ),
        goal(
            "craft_steam_engine",
            "Craft Steam Engine",
            "Build a steam engine for power",
            &["smelt_iron", "craft_gears"],
            &[("steam-engine", 1)],
            &[],
            45,
            "power",
            30,
        ),
        goal(
            "setup_steam_power",
            "Setup Steam Power",
            "Build and connect steam power",
            &["craft_boiler", "craft_steam_engine"],
            &[],
            &[("steam-engine", 1), ("boiler", 1)],
            60,
            "power",
            120,
        ),
        goal(
            "craft_red_science",
            "Craft Red Science Packs",
            "Produce automation science packs",
            &["smelt_copper", "craft_gears"],
            &[("automation-science-pack", 10)],
            &[],
            70,
            "science",
            60,
        ),
    ]
}
