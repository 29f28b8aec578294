// Feedback parser - the one place where environment text becomes structure
use crate::models::{
    ItemKey, ObservedEntity, Observation, Position, ResourceKind, ResourceSighting,
};
use regex::Regex;

/// Scrapes the environment's free-text output into a typed Observation.
/// Everything the patterns fail to match is simply absent from the result;
/// the state tracker treats absence as "no change". No other module is
/// allowed to look at raw environment text.
pub struct FeedbackParser {
    inventory_block: Regex,
    inventory_pair: Regex,
    inventory_line: Regex,
    entity: Regex,
    entity_status: Regex,
    player_position: Regex,
    resource_sightings: Vec<(ResourceKind, Regex)>,
}

impl FeedbackParser {
    pub fn new() -> Self {
        let resource_sightings = ResourceKind::ALL
            .iter()
            .map(|kind| {
                let pattern = format!(
                    r"(?i){}\s+(?:patch\s+)?found\s+at\s*\(?\s*(-?[0-9.]+)[,\s]+\s*(-?[0-9.]+)",
                    kind.sighting_word()
                );
                (*kind, Regex::new(&pattern).unwrap())
            })
            .collect();

        FeedbackParser {
            // {'iron-plate': 9, 'stone': 5}
            inventory_block: Regex::new(r"(?i)inventory\s*[=:]?\s*\{([^}]+)\}").unwrap(),
            inventory_pair: Regex::new(r#"['"]([^'"]+)['"]\s*:\s*(\d+)"#).unwrap(),
            // inventory: iron-plate: 9
            inventory_line: Regex::new(r"(?i)inventory[:\s]+([a-zA-Z][a-zA-Z0-9_-]*)[:\s]+(\d+)")
                .unwrap(),
            // Entity(name='stone-furnace', position=Position(x=3.5, y=-2.0), ...)
            entity: Regex::new(
                r#"name=['"]([^'"]+)['"][^)]*position=Position\(x=(-?[0-9.]+),?\s*y=(-?[0-9.]+)\)"#,
            )
            .unwrap(),
            entity_status: Regex::new(r"status=EntityStatus\.(\w+)").unwrap(),
            player_position: Regex::new(
                r"(?i)player\s+(?:at|position)[:\s]*\(?\s*(-?[0-9.]+)[,\s]+\s*(-?[0-9.]+)",
            )
            .unwrap(),
            resource_sightings,
        }
    }

    pub fn parse(&self, stdout: &str, stderr: &str) -> Observation {
        let mut observation = Observation {
            raw_output: stdout.to_string(),
            ..Observation::default()
        };

        self.parse_inventory(stdout, &mut observation);
        self.parse_entities(stdout, &mut observation);
        self.parse_resources(stdout, &mut observation);

        if let Some(caps) = self.player_position.captures(stdout) {
            if let Some(position) = position_from(&caps[1], &caps[2]) {
                observation.player_position = Some(position);
            }
        }

        if !stderr.trim().is_empty() {
            let mut line = stderr.trim().to_string();
            line.truncate(200);
            observation.errors.push(line);
        }

        observation
    }

    fn parse_inventory(&self, output: &str, observation: &mut Observation) {
        if let Some(caps) = self.inventory_block.captures(output) {
            for pair in self.inventory_pair.captures_iter(&caps[1]) {
                if let Ok(count) = pair[2].parse::<u32>() {
                    observation
                        .inventory
                        .insert(ItemKey::new(&pair[1]), count);
                }
            }
        }

        for caps in self.inventory_line.captures_iter(output) {
            if let Ok(count) = caps[2].parse::<u32>() {
                observation.inventory.insert(ItemKey::new(&caps[1]), count);
            }
        }
    }

    fn parse_entities(&self, output: &str, observation: &mut Observation) {
        for caps in self.entity.captures_iter(output) {
            if let Some(position) = position_from(&caps[2], &caps[3]) {
                observation.entities.push(ObservedEntity {
                    name: ItemKey::new(&caps[1]),
                    position,
                    status: None,
                });
            }
        }

        // Status lines follow the entity they describe; attach to the most
        // recent sighting.
        for caps in self.entity_status.captures_iter(output) {
            if let Some(last) = observation.entities.last_mut() {
                last.status = Some(caps[1].to_string());
            }
        }
    }

    fn parse_resources(&self, output: &str, observation: &mut Observation) {
        for (kind, pattern) in &self.resource_sightings {
            if let Some(caps) = pattern.captures(output) {
                if let Some(position) = position_from(&caps[1], &caps[2]) {
                    observation.resources.push(ResourceSighting {
                        resource: kind.key(),
                        position,
                    });
                }
            }
        }
    }
}

impl Default for FeedbackParser {
    fn default() -> Self {
        FeedbackParser::new()
    }
}

fn position_from(x: &str, y: &str) -> Option<Position> {
    match (x.parse::<f64>(), y.parse::<f64>()) {
        (Ok(x), Ok(y)) => Some(Position::new(x, y)),
        _ => None,
    }
}
