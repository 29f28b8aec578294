// World state - the planner's current belief about the factory
use crate::models::entity::{PlacedEntity, Position, PowerStatus};
use crate::models::item::ItemKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Point-in-time snapshot of inventory, placed entities and known resource
/// patches. Pure data plus query methods; mutation goes through the
/// StateTracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub inventory: HashMap<ItemKey, u32>,
    pub entities: Vec<PlacedEntity>,
    pub resources_nearby: HashMap<ItemKey, Position>,
    pub player_position: Position,
    pub tick: u64,

    // Derived on every update, never set directly
    pub power_status: PowerStatus,
    pub automation_level: u8,
}

impl Default for WorldState {
    fn default() -> Self {
        WorldState {
            inventory: HashMap::new(),
            entities: Vec::new(),
            resources_nearby: HashMap::new(),
            player_position: Position::new(0.0, 0.0),
            tick: 0,
            power_status: PowerStatus::None,
            automation_level: 0,
        }
    }
}

impl WorldState {
    pub fn new() -> Self {
        WorldState::default()
    }

    /// Inventory count for an item in any naming convention. Unknown items
    /// are 0, never an error.
    pub fn get_item_count(&self, item: &str) -> u32 {
        self.count_of(&ItemKey::new(item))
    }

    pub fn count_of(&self, key: &ItemKey) -> u32 {
        self.inventory.get(key).copied().unwrap_or(0)
    }

    pub fn has_item(&self, item: &str, count: u32) -> bool {
        self.get_item_count(item) >= count
    }

    /// All placed entities in a type family: "furnace" matches
    /// "stone-furnace" and "steel-furnace".
    pub fn get_entities_by_type(&self, entity_type: &str) -> Vec<&PlacedEntity> {
        let family = ItemKey::new(entity_type);
        self.entities
            .iter()
            .filter(|e| e.name.in_family(&family))
            .collect()
    }

    pub fn get_nearest_resource(&self, resource_type: &str) -> Option<Position> {
        let family = ItemKey::new(resource_type);
        self.resources_nearby
            .iter()
            .filter(|(key, _)| key.in_family(&family))
            .map(|(_, pos)| *pos)
            .min_by(|a, b| {
                let da = self.player_position.distance_to(a);
                let db = self.player_position.distance_to(b);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    pub fn count_working_entities(&self, entity_type: &str) -> u32 {
        self.get_entities_by_type(entity_type)
            .iter()
            .filter(|e| e.is_working())
            .count() as u32
    }

    /// Recompute power status and automation level from placed entities.
    /// Called by the tracker after every merge.
    pub fn update_derived(&mut self) {
        self.power_status = if self
            .entities
            .iter()
            .any(|e| e.is_power() && e.name.as_str().contains("steam"))
        {
            PowerStatus::Steam
        } else if self
            .entities
            .iter()
            .any(|e| e.is_power() && e.name.as_str().contains("solar"))
        {
            PowerStatus::Solar
        } else if self
            .entities
            .iter()
            .any(|e| e.is_drill() && e.name.as_str().contains("burner") && e.is_working())
        {
            PowerStatus::Burner
        } else {
            PowerStatus::None
        };

        let mut level = 0;
        if !self.get_entities_by_type("furnace").is_empty() {
            level = 1;
        }
        if !self.get_entities_by_type("drill").is_empty() {
            level = 2;
        }
        if !self.get_entities_by_type("inserter").is_empty() {
            level = 3;
        }
        if !self.get_entities_by_type("belt").is_empty() {
            level = 4;
        }
        if !self.get_entities_by_type("assembling-machine").is_empty() {
            level = 5;
        }
        self.automation_level = level;
    }
}
