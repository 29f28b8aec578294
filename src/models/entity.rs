// Entity models - placed structures and map positions
use crate::models::item::ItemKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// A structure placed in the world, as last reported by the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedEntity {
    pub name: ItemKey,
    pub position: Position,
    pub direction: String,
    pub status: String,
    pub inventory: HashMap<ItemKey, u32>,
    pub fuel: HashMap<ItemKey, u32>,
}

impl PlacedEntity {
    pub fn new(name: &str, position: Position) -> Self {
        PlacedEntity {
            name: ItemKey::new(name),
            position,
            direction: "NORTH".to_string(),
            status: "NORMAL".to_string(),
            inventory: HashMap::new(),
            fuel: HashMap::new(),
        }
    }

    pub fn is_working(&self) -> bool {
        self.status.eq_ignore_ascii_case("working")
    }

    pub fn is_furnace(&self) -> bool {
        self.name.as_str().contains("furnace")
    }

    pub fn is_drill(&self) -> bool {
        self.name.as_str().contains("drill") || self.name.as_str().contains("mining")
    }

    pub fn is_power(&self) -> bool {
        ["engine", "boiler", "solar", "accumulator"]
            .iter()
            .any(|w| self.name.as_str().contains(w))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerStatus {
    None,
    Burner,
    Steam,
    Solar,
    Nuclear,
}

impl fmt::Display for PowerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PowerStatus::None => "none",
            PowerStatus::Burner => "burner",
            PowerStatus::Steam => "steam",
            PowerStatus::Solar => "solar",
            PowerStatus::Nuclear => "nuclear",
        };
        f.write_str(s)
    }
}
