// Action model - one primitive instruction emitted by the planner
use crate::environment::SkillCall;
use crate::models::entity::Position;
use crate::models::item::ItemKey;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    Gather,
    Craft,
    Place,
    Smelt,
    Move,
    Insert,
    Extract,
    Wait,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionType::Gather => "gather",
            ActionType::Craft => "craft",
            ActionType::Place => "place",
            ActionType::Smelt => "smelt",
            ActionType::Move => "move",
            ActionType::Insert => "insert",
            ActionType::Extract => "extract",
            ActionType::Wait => "wait",
        };
        f.write_str(s)
    }
}

/// A single executable instruction. Built once by the planner, rendered to
/// a skill call, then discarded - never mutated.
#[derive(Debug, Clone)]
pub struct Action {
    pub action_type: ActionType,
    pub target: ItemKey,
    pub quantity: u32,
    pub position: Option<Position>,
    pub extra: HashMap<String, String>,
}

impl Action {
    pub fn new(action_type: ActionType, target: &str, quantity: u32) -> Self {
        Action {
            action_type,
            target: ItemKey::new(target),
            quantity,
            position: None,
            extra: HashMap::new(),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_extra(mut self, key: &str, value: &str) -> Self {
        self.extra.insert(key.to_string(), value.to_string());
        self
    }

    /// Render to a primitive call for the environment. Pure: an
    /// under-specified action becomes a detectable no-op, never an error.
    pub fn to_skill_call(&self) -> SkillCall {
        match self.action_type {
            ActionType::Gather => SkillCall::new(
                "gather",
                vec![quoted(&self.target), self.quantity.to_string()],
            ),
            ActionType::Craft => SkillCall::new(
                "craft",
                vec![quoted(&self.target), self.quantity.to_string()],
            ),
            ActionType::Place => {
                let mut args = vec![quoted(&self.target)];
                if let Some(pos) = self.position {
                    args.push(format!("{:.1}", pos.x));
                    args.push(format!("{:.1}", pos.y));
                }
                SkillCall::new("place", args)
            }
            ActionType::Smelt => {
                let ore = self
                    .extra
                    .get("ore")
                    .cloned()
                    .unwrap_or_else(|| "iron-ore".to_string());
                SkillCall::new(
                    "smelt",
                    vec![
                        format!("'{}'", ore),
                        quoted(&self.target),
                        self.quantity.to_string(),
                    ],
                )
            }
            ActionType::Move => match self.position {
                Some(pos) => SkillCall::new(
                    "move_to",
                    vec![format!("{:.1}", pos.x), format!("{:.1}", pos.y)],
                ),
                None => SkillCall::noop("move action without a position"),
            },
            ActionType::Insert => match self.extra.get("entity") {
                Some(entity) => SkillCall::new(
                    "insert_item",
                    vec![
                        quoted(&self.target),
                        format!("'{}'", entity),
                        self.quantity.to_string(),
                    ],
                ),
                None => SkillCall::noop("insert action without a target entity"),
            },
            ActionType::Extract => match self.extra.get("entity") {
                Some(entity) => SkillCall::new(
                    "extract_item",
                    vec![
                        quoted(&self.target),
                        format!("'{}'", entity),
                        self.quantity.to_string(),
                    ],
                ),
                None => SkillCall::noop("extract action without a source entity"),
            },
            ActionType::Wait => SkillCall::new("sleep", vec![self.quantity.to_string()]),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, qty={})", self.action_type, self.target, self.quantity)
    }
}

fn quoted(key: &ItemKey) -> String {
    format!("'{}'", key)
}
