// Recipe model - static production rules loaded from the recipe table
use crate::models::item::ItemKey;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeCategory {
    Raw,
    Smelting,
    Crafting,
    Chemistry,
    Fluid,
}

#[derive(Debug, Clone)]
pub struct Recipe {
    pub name: ItemKey,
    pub category: RecipeCategory,
    /// Ordered (item, amount) pairs. For smelting recipes the first
    /// ingredient is the ore the furnace consumes.
    pub ingredients: Vec<(ItemKey, u32)>,
    /// Units produced per craft operation, at least 1.
    pub yield_count: u32,
}

impl Recipe {
    pub fn new(name: &str, category: RecipeCategory, ingredients: Vec<(&str, u32)>) -> Self {
        Recipe {
            name: ItemKey::new(name),
            category,
            ingredients: ingredients
                .into_iter()
                .map(|(n, a)| (ItemKey::new(n), a))
                .collect(),
            yield_count: 1,
        }
    }

    pub fn with_yield(mut self, yield_count: u32) -> Self {
        self.yield_count = yield_count.max(1);
        self
    }

    pub fn raw(name: &str) -> Self {
        Recipe::new(name, RecipeCategory::Raw, vec![])
    }

    pub fn is_raw(&self) -> bool {
        self.category == RecipeCategory::Raw
    }

    pub fn is_smelting(&self) -> bool {
        self.category == RecipeCategory::Smelting
    }
}
