// State Tracker - owns the live world state and its snapshot history
use crate::models::{ItemKey, Observation, PlacedEntity, WorldState};
use crate::o_debug;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// A pre-update copy of the world state, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    pub state: WorldState,
    pub captured_at: DateTime<Utc>,
}

/// Applies observations to the world state. Updates are monotonic: a field
/// the observation does not carry leaves the previous value untouched, so
/// partial observations enrich the state instead of resetting it.
pub struct StateTracker {
    current: WorldState,
    history: VecDeque<StateSnapshot>,
    max_history: usize,
}

impl StateTracker {
    pub fn new(max_history: usize) -> Self {
        StateTracker {
            current: WorldState::new(),
            history: VecDeque::new(),
            max_history: max_history.max(1),
        }
    }

    pub fn current(&self) -> &WorldState {
        &self.current
    }

    pub fn history(&self) -> &VecDeque<StateSnapshot> {
        &self.history
    }

    /// Merge one observation into the state. The pre-update snapshot goes
    /// into the bounded history ring first, oldest entry evicted.
    pub fn apply(&mut self, observation: &Observation) -> &WorldState {
        if self.history.len() >= self.max_history {
            self.history.pop_front();
        }
        self.history.push_back(StateSnapshot {
            state: self.current.clone(),
            captured_at: Utc::now(),
        });

        for (item, count) in &observation.inventory {
            self.current.inventory.insert(item.clone(), *count);
        }

        for observed in &observation.entities {
            self.merge_entity(observed.name.clone(), observed);
        }

        for sighting in &observation.resources {
            self.current
                .resources_nearby
                .insert(sighting.resource.clone(), sighting.position);
        }

        if let Some(position) = observation.player_position {
            self.current.player_position = position;
        }

        self.current.update_derived();
        self.current.tick += 1;

        if !observation.errors.is_empty() {
            o_debug!(
                "⚠️ Observation carried {} error line(s)",
                observation.errors.len()
            );
        }

        &self.current
    }

    /// Same entity = same name within one tile of a known position;
    /// re-observing it refreshes the status instead of duplicating the
    /// record.
    fn merge_entity(&mut self, name: ItemKey, observed: &crate::models::ObservedEntity) {
        let existing = self
            .current
            .entities
            .iter_mut()
            .find(|e| e.name == name && e.position.distance_to(&observed.position) < 1.0);

        match existing {
            Some(entity) => {
                if let Some(status) = &observed.status {
                    entity.status = status.clone();
                }
            }
            None => {
                let mut entity = PlacedEntity::new(name.as_str(), observed.position);
                if let Some(status) = &observed.status {
                    entity.status = status.clone();
                }
                self.current.entities.push(entity);
            }
        }
    }

    pub fn reset(&mut self) {
        self.current = WorldState::new();
        self.history.clear();
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("📦 Inventory: {} item types", self.current.inventory.len()),
            format!("🏗️ Entities: {} placed", self.current.entities.len()),
            format!("⚡ Power: {}", self.current.power_status),
            format!("🤖 Automation: Level {}/5", self.current.automation_level),
        ];

        if !self.current.inventory.is_empty() {
            let mut top: Vec<(&ItemKey, &u32)> = self.current.inventory.iter().collect();
            top.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            let items: Vec<String> = top
                .iter()
                .take(5)
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect();
            lines.push(format!("   Top items: {}", items.join(", ")));
        }

        lines.join("\n")
    }
}
