// Goal Types - declarative goal nodes in the requirement graph
use crate::goals::GoalStatus;
use crate::models::{ItemKey, WorldState};
use std::collections::BTreeMap;

/// One node in the goal graph: what must be true in the world for this
/// goal to count as done, and which goals must complete before it can be
/// worked on. Completion is always recomputed from the current state,
/// never cached.
#[derive(Debug, Clone)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub description: String,

    /// Prerequisite goal ids.
    pub requires: Vec<String>,

    // Completion criteria. BTreeMaps keep iteration deterministic.
    pub items_required: BTreeMap<ItemKey, u32>,
    pub entities_required: BTreeMap<ItemKey, u32>,

    /// 0-100, higher wins within a ranking tier.
    pub priority: u32,
    pub category: String,
    pub estimated_time_seconds: u64,

    // Runtime state
    pub status: GoalStatus,
    pub attempts: u32,
}

impl Goal {
    /// A goal is complete iff every item and entity criterion is
    /// simultaneously satisfied by the given state.
    pub fn check_completion(&self, state: &WorldState) -> bool {
        for (item, count) in &self.items_required {
            if state.count_of(item) < *count {
                return false;
            }
        }
        for (entity_type, count) in &self.entities_required {
            if (state.get_entities_by_type(entity_type.as_str()).len() as u32) < *count {
                return false;
            }
        }
        true
    }

    /// The primary item this goal is after, if it has item criteria.
    pub fn target_item(&self) -> Option<&ItemKey> {
        self.items_required.keys().next()
    }

    pub fn is_permanently_failed(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }
}
