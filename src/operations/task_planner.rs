// Task Planner - turns "obtain N of item X" into an ordered action sequence
use crate::goals::Goal;
use crate::models::{Action, ActionType, ItemKey, RecipeCategory, WorldState};
use crate::o_debug;
use crate::storage::RecipeDatabase;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Plans action sequences against the recipe table and the current world
/// state. Planning is a pure function of its inputs: no planner state
/// survives between calls, so re-planning mid-execution is always safe and
/// the plan naturally shrinks as the state improves.
pub struct TaskPlanner {
    recipes: RecipeDatabase,
}

impl TaskPlanner {
    pub fn new(recipes: RecipeDatabase) -> Self {
        TaskPlanner { recipes }
    }

    pub fn recipes(&self) -> &RecipeDatabase {
        &self.recipes
    }

    /// Plan the actions needed to obtain `quantity` of `target_item`,
    /// net of what the inventory already holds. Already-satisfied targets
    /// produce an empty plan.
    pub fn plan_item(&self, target_item: &str, quantity: u32, state: &WorldState) -> Vec<Action> {
        let target = ItemKey::new(target_item);
        let requirements = self.calculate_requirements(&target, quantity, state);
        self.requirements_to_actions(&requirements, state)
    }

    /// Plan every criterion of a goal: item targets first, then placement
    /// of any entity type the world is still missing.
    pub fn plan_goal(&self, goal: &Goal, state: &WorldState) -> Vec<Action> {
        let mut actions = Vec::new();

        for (item, count) in &goal.items_required {
            actions.extend(self.plan_item(item.as_str(), *count, state));
        }

        for (entity_type, count) in &goal.entities_required {
            let placed = state.get_entities_by_type(entity_type.as_str()).len() as u32;
            if placed >= *count {
                continue;
            }
            let item = self.placeable_item_for(entity_type);
            for _ in placed..*count {
                if !state.has_item(item.as_str(), 1) {
                    actions.extend(self.plan_item(item.as_str(), 1, state));
                }
                actions.push(Action::new(ActionType::Place, item.as_str(), 1));
            }
        }

        actions
    }

    /// Entity criteria may name a family ("furnace") rather than a
    /// craftable item; resolve to the item we know how to build.
    fn placeable_item_for(&self, entity_type: &ItemKey) -> ItemKey {
        if self.recipes.get_key(entity_type).is_some() {
            return entity_type.clone();
        }
        match entity_type.as_str() {
            "furnace" => ItemKey::new("stone-furnace"),
            "drill" | "mining-drill" => ItemKey::new("burner-mining-drill"),
            _ => entity_type.clone(),
        }
    }

    /// Net requirements for one target: a map from item to the number of
    /// gather units (raw) or craft operations (produced items) still
    /// needed after crediting current inventory.
    ///
    /// Explicit worklist instead of recursion: each queue entry is a gross
    /// demand, and `budget` credits each item's stock at most once across
    /// the whole pass, so shared sub-dependencies sum their net needs
    /// rather than re-crediting the same stock.
    fn calculate_requirements(
        &self,
        target: &ItemKey,
        quantity: u32,
        state: &WorldState,
    ) -> BTreeMap<ItemKey, u32> {
        let mut requirements: BTreeMap<ItemKey, u32> = BTreeMap::new();
        let mut budget: HashMap<ItemKey, u32> = HashMap::new();
        let mut worklist: VecDeque<(ItemKey, u32)> = VecDeque::new();
        worklist.push_back((target.clone(), quantity));

        while let Some((item, demand)) = worklist.pop_front() {
            let net = Self::credit_inventory(&mut budget, state, &item, demand);
            if net == 0 {
                continue;
            }

            match self.recipes.get_key(&item) {
                Some(recipe) if !recipe.is_raw() => {
                    let crafts = net.div_ceil(recipe.yield_count);
                    *requirements.entry(item).or_insert(0) += crafts;
                    for (ingredient, amount) in &recipe.ingredients {
                        worklist.push_back((ingredient.clone(), amount * crafts));
                    }
                }
                // Raw, or no recipe at all: best-effort gather target
                _ => {
                    *requirements.entry(item).or_insert(0) += net;
                }
            }
        }

        requirements
    }

    /// Subtract remaining inventory credit for `item` from `demand`,
    /// consuming the credit so later demands for the same item see only
    /// what is left.
    fn credit_inventory(
        budget: &mut HashMap<ItemKey, u32>,
        state: &WorldState,
        item: &ItemKey,
        demand: u32,
    ) -> u32 {
        let available = budget
            .entry(item.clone())
            .or_insert_with(|| state.count_of(item));
        let used = demand.min(*available);
        *available -= used;
        demand - used
    }

    /// Emit actions for a requirement map in physical dependency order:
    /// gather raws, bootstrap a furnace when smelting needs one, smelt,
    /// then craft in dependency order.
    fn requirements_to_actions(
        &self,
        requirements: &BTreeMap<ItemKey, u32>,
        state: &WorldState,
    ) -> Vec<Action> {
        let mut raw_items: Vec<(ItemKey, u32)> = Vec::new();
        let mut smelt_items: Vec<(ItemKey, u32)> = Vec::new();
        let mut craft_items: Vec<(ItemKey, u32)> = Vec::new();

        for (item, qty) in requirements {
            match self.recipes.category_of(item) {
                RecipeCategory::Raw => raw_items.push((item.clone(), *qty)),
                RecipeCategory::Smelting => smelt_items.push((item.clone(), *qty)),
                _ => craft_items.push((item.clone(), *qty)),
            }
        }

        let mut actions = Vec::new();

        for (item, qty) in &raw_items {
            actions.push(Action::new(ActionType::Gather, item.as_str(), *qty));
        }

        // A furnace must exist in the world before anything can be
        // smelted; plan one if neither a placed furnace nor a pocket
        // furnace is available.
        if !smelt_items.is_empty() && state.get_entities_by_type("furnace").is_empty() {
            if !state.has_item("stone-furnace", 1) {
                let furnace_actions = self.plan_item("stone-furnace", 1, state);
                o_debug!(
                    "🏭 No furnace available, planned {} extra actions for one",
                    furnace_actions.len()
                );
                actions.extend(furnace_actions);
            }
            actions.push(Action::new(ActionType::Place, "stone-furnace", 1));
        }

        for (item, qty) in &smelt_items {
            let mut action = Action::new(ActionType::Smelt, item.as_str(), *qty);
            if let Some(recipe) = self.recipes.get_key(item) {
                if let Some((ore, _)) = recipe.ingredients.first() {
                    action = action.with_extra("ore", ore.as_str());
                }
            }
            actions.push(action);
        }

        for (item, qty) in self.sort_by_dependencies(craft_items) {
            actions.push(Action::new(ActionType::Craft, item.as_str(), qty));
        }

        actions
    }

    /// Order craft items so that nothing is crafted before the things it
    /// depends on, using the topological order from the recipe database.
    fn sort_by_dependencies(&self, items: Vec<(ItemKey, u32)>) -> Vec<(ItemKey, u32)> {
        let mut dep_order: Vec<ItemKey> = Vec::new();
        for (item, _) in &items {
            for dep in self.recipes.get_dependencies(item.as_str()) {
                if !dep_order.contains(&dep) {
                    dep_order.push(dep);
                }
            }
        }

        let rank = |item: &ItemKey| {
            dep_order
                .iter()
                .position(|d| d == item)
                .unwrap_or(dep_order.len())
        };

        let mut sorted = items;
        sorted.sort_by_key(|(item, _)| rank(item));
        sorted
    }

    /// Render an action list as a numbered skill-call script the
    /// environment can run line by line.
    pub fn generate_script(&self, actions: &[Action]) -> String {
        let mut lines = vec![
            "# Auto-generated action plan".to_string(),
            "# ===========================".to_string(),
            String::new(),
        ];

        for (i, action) in actions.iter().enumerate() {
            lines.push(format!("# Step {}: {}", i + 1, action));
            lines.push(action.to_skill_call().to_string());
            lines.push(String::new());
        }

        lines.join("\n")
    }
}
