// Recipe database - loads and queries the static recipe table
use crate::models::{ItemKey, Recipe, RecipeCategory};
use crate::{o_debug, o_error};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;

// On-disk shape: {"recipes": {"iron-plate": {"category": "smelting",
// "ingredients": [{"name": "iron-ore", "amount": 1}], "yield": 1}}}
#[derive(Debug, Deserialize)]
struct RecipeFile {
    #[serde(default)]
    recipes: HashMap<String, RecipeEntry>,
}

#[derive(Debug, Deserialize)]
struct RecipeEntry {
    #[serde(default = "default_category")]
    category: RecipeCategory,
    #[serde(default)]
    ingredients: Vec<IngredientEntry>,
    #[serde(rename = "yield", default = "default_yield")]
    yield_count: u32,
}

#[derive(Debug, Deserialize)]
struct IngredientEntry {
    name: String,
    amount: u32,
}

fn default_category() -> RecipeCategory {
    RecipeCategory::Crafting
}

fn default_yield() -> u32 {
    1
}

pub struct RecipeDatabase {
    recipes: HashMap<ItemKey, Recipe>,
}

impl RecipeDatabase {
    /// Load the recipe table from disk. A missing or unparsable file is
    /// not fatal: the database falls back to the built-in minimal table so
    /// the planner stays functional.
    pub fn load(path: &str) -> Self {
        match Self::load_file(path) {
            Ok(recipes) => {
                o_debug!("📖 Loaded {} recipes from {}", recipes.len(), path);
                RecipeDatabase { recipes }
            }
            Err(e) => {
                o_error!("⚠️ Could not load recipes from {}: {}", path, e);
                o_error!("📖 Falling back to built-in recipe table");
                RecipeDatabase {
                    recipes: builtin_recipes(),
                }
            }
        }
    }

    /// Direct construction, used by tests and demos.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        RecipeDatabase {
            recipes: recipes.into_iter().map(|r| (r.name.clone(), r)).collect(),
        }
    }

    pub fn builtin() -> Self {
        RecipeDatabase {
            recipes: builtin_recipes(),
        }
    }

    fn load_file(path: &str) -> Result<HashMap<ItemKey, Recipe>, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let file: RecipeFile = serde_json::from_str(&content)?;

        if file.recipes.is_empty() {
            return Err(format!("recipe file {} contains no recipes", path).into());
        }

        let mut recipes = HashMap::new();
        for (name, entry) in file.recipes {
            let key = ItemKey::new(&name);
            recipes.insert(
                key.clone(),
                Recipe {
                    name: key,
                    category: entry.category,
                    ingredients: entry
                        .ingredients
                        .into_iter()
                        .map(|i| (ItemKey::new(&i.name), i.amount))
                        .collect(),
                    yield_count: entry.yield_count.max(1),
                },
            );
        }
        Ok(recipes)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipe lookup in any naming convention.
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(&ItemKey::new(name))
    }

    pub fn get_key(&self, key: &ItemKey) -> Option<&Recipe> {
        self.recipes.get(key)
    }

    /// Category for planning purposes: items without a recipe are treated
    /// as raw gather targets.
    pub fn category_of(&self, key: &ItemKey) -> RecipeCategory {
        self.recipes
            .get(key)
            .map(|r| r.category)
            .unwrap_or(RecipeCategory::Raw)
    }

    /// All transitive dependencies of an item in topological order,
    /// dependencies before dependents, the item itself last. The visited
    /// set makes this terminate even if the recipe data smuggles in a
    /// cycle.
    pub fn get_dependencies(&self, name: &str) -> Vec<ItemKey> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        self.collect_dependencies(&ItemKey::new(name), &mut visited, &mut order);
        order
    }

    fn collect_dependencies(
        &self,
        key: &ItemKey,
        visited: &mut HashSet<ItemKey>,
        order: &mut Vec<ItemKey>,
    ) {
        if !visited.insert(key.clone()) {
            return;
        }

        match self.recipes.get(key) {
            Some(recipe) if !recipe.is_raw() => {
                for (ingredient, _) in &recipe.ingredients {
                    self.collect_dependencies(ingredient, visited, order);
                }
                order.push(key.clone());
            }
            // Raw or unknown items are leaves
            _ => order.push(key.clone()),
        }
    }
}

/// Minimal built-in table: the raw resources plus the first crafted tiers,
/// enough to keep the planner useful without a recipe file.
fn builtin_recipes() -> HashMap<ItemKey, Recipe> {
    let list = vec![
        Recipe::raw("stone"),
        Recipe::raw("coal"),
        Recipe::raw("iron-ore"),
        Recipe::raw("copper-ore"),
        Recipe::raw("wood"),
        Recipe::new("iron-plate", RecipeCategory::Smelting, vec![("iron-ore", 1)]),
        Recipe::new("copper-plate", RecipeCategory::Smelting, vec![("copper-ore", 1)]),
        Recipe::new("stone-furnace", RecipeCategory::Crafting, vec![("stone", 5)]),
        Recipe::new("iron-gear-wheel", RecipeCategory::Crafting, vec![("iron-plate", 2)]),
        Recipe::new(
            "burner-mining-drill",
            RecipeCategory::Crafting,
            vec![("stone-furnace", 1), ("iron-plate", 3), ("iron-gear-wheel", 3)],
        ),
    ];
    list.into_iter().map(|r| (r.name.clone(), r)).collect()
}
