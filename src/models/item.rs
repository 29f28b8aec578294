// Canonical item naming - every lookup goes through one normalization point
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical item/entity name. The game, the recipe file and the feedback
/// text disagree on separators ("iron_ore", "iron ore", "Iron-Ore"); all of
/// them normalize to the same key here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(raw: &str) -> Self {
        ItemKey(raw.trim().to_lowercase().replace(['_', ' '], "-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `self` belongs to the family named by `family`, e.g.
    /// "stone-furnace" is in the "furnace" family. Exact matches count too.
    pub fn in_family(&self, family: &ItemKey) -> bool {
        self.0.contains(family.as_str())
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemKey {
    fn from(raw: &str) -> Self {
        ItemKey::new(raw)
    }
}

impl From<String> for ItemKey {
    fn from(raw: String) -> Self {
        ItemKey::new(&raw)
    }
}

/// The raw resources the feedback parser knows how to spot in environment
/// output. Everything else stays an untyped ItemKey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Stone,
    Coal,
    IronOre,
    CopperOre,
    Wood,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Stone,
        ResourceKind::Coal,
        ResourceKind::IronOre,
        ResourceKind::CopperOre,
        ResourceKind::Wood,
    ];

    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.name())
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Stone => "stone",
            ResourceKind::Coal => "coal",
            ResourceKind::IronOre => "iron-ore",
            ResourceKind::CopperOre => "copper-ore",
            ResourceKind::Wood => "wood",
        }
    }

    /// The word the environment uses when announcing a sighting of this
    /// resource ("iron found at ..."), which is not always the item name.
    pub fn sighting_word(&self) -> &'static str {
        match self {
            ResourceKind::Stone => "stone",
            ResourceKind::Coal => "coal",
            ResourceKind::IronOre => "iron",
            ResourceKind::CopperOre => "copper",
            ResourceKind::Wood => "wood",
        }
    }

    pub fn from_key(key: &ItemKey) -> Option<ResourceKind> {
        ResourceKind::ALL.iter().copied().find(|r| r.key() == *key)
    }
}
