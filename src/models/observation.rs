// Observation model - the structured snapshot produced at the environment boundary
use crate::models::entity::Position;
use crate::models::item::ItemKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What one round-trip to the environment taught us. Every field is
/// partial by design: an absent entry means "nothing observed", and the
/// state tracker must leave the previous value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Observation {
    /// Absolute inventory counts that were visible in this observation.
    #[serde(default)]
    pub inventory: HashMap<ItemKey, u32>,
    #[serde(default)]
    pub entities: Vec<ObservedEntity>,
    #[serde(default)]
    pub resources: Vec<ResourceSighting>,
    #[serde(default)]
    pub player_position: Option<Position>,
    /// Unparsed environment output, kept for diagnostics only.
    #[serde(default)]
    pub raw_output: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl Observation {
    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
            && self.entities.is_empty()
            && self.resources.is_empty()
            && self.player_position.is_none()
            && self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservedEntity {
    pub name: ItemKey,
    pub position: Position,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSighting {
    pub resource: ItemKey,
    pub position: Position,
}
