// Environment module - boundary to the external factory simulation
pub mod feedback;
pub mod http_env;

pub use feedback::FeedbackParser;
pub use http_env::HttpEnvironment;

use crate::models::Observation;
use async_trait::async_trait;
use std::fmt;

/// One rendered primitive call: a skill name plus its literal arguments.
/// This is the only thing the core ever hands to the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCall {
    pub skill: String,
    pub args: Vec<String>,
}

impl SkillCall {
    pub fn new(skill: &str, args: Vec<String>) -> Self {
        SkillCall {
            skill: skill.to_string(),
            args,
        }
    }

    /// A call that does nothing. Rendered as a comment line so a partially
    /// specified action never crashes the execution loop - the caller can
    /// see it, report it and move on.
    pub fn noop(reason: &str) -> Self {
        SkillCall {
            skill: "noop".to_string(),
            args: vec![reason.to_string()],
        }
    }

    pub fn is_noop(&self) -> bool {
        self.skill == "noop"
    }
}

// Display is the wire form: `gather('stone', 5)` or `# noop: reason`.
impl fmt::Display for SkillCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            write!(f, "# noop: {}", self.args.join(", "))
        } else {
            write!(f, "{}({})", self.skill, self.args.join(", "))
        }
    }
}

/// The external simulation the agent plays through. The core only issues
/// SkillCalls and consumes structured Observations; how either crosses the
/// wire is this trait's problem.
#[async_trait]
pub trait FactoryEnvironment: Send + Sync {
    /// Execute one primitive call and return what it revealed.
    async fn execute(&self, call: &SkillCall) -> Result<Observation, Box<dyn std::error::Error>>;

    /// Passive snapshot request - no side effects in the game world.
    async fn observe(&self) -> Result<Observation, Box<dyn std::error::Error>>;
}
