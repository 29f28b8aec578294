// Agent configuration - TOML file with hot reload
use crate::o_info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoryConfig {
    pub goal: GoalConfig,
    pub planner: PlannerConfig,
    pub state: StateConfig,
    pub timing: TimingConfig,
    pub environment: EnvironmentConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalConfig {
    /// Goal id from the goal tree the agent drives toward
    pub target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Failed attempts before a goal is permanently excluded
    pub max_goal_attempts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Pre-update snapshots kept in the history ring
    pub history_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay between autonomous cycles in seconds
    pub cycle_delay_seconds: u64,
    /// Retry delay after a failed cycle in seconds
    pub error_retry_delay_seconds: u64,
    /// Config hot-reload check interval in seconds
    pub config_reload_interval_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Base URL of the factory simulation server
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub recipes_file: String,
    pub goal_tree_file: String,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        FactoryConfig {
            goal: GoalConfig {
                target: "craft_burner_drill".to_string(),
            },
            planner: PlannerConfig {
                max_goal_attempts: 3,
            },
            state: StateConfig {
                history_capacity: 10,
            },
            timing: TimingConfig {
                cycle_delay_seconds: 5,
                error_retry_delay_seconds: 30,
                config_reload_interval_seconds: 30,
            },
            environment: EnvironmentConfig {
                base_url: "http://localhost:8000".to_string(),
                request_timeout_seconds: 120,
            },
            paths: PathsConfig {
                recipes_file: "data/recipes.json".to_string(),
                goal_tree_file: "data/goal_tree.json".to_string(),
            },
        }
    }
}

impl FactoryConfig {
    /// Load configuration from file, creating the default if it doesn't exist
    pub fn load_or_create(config_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if Path::new(config_path).exists() {
            o_info!("📋 Loading configuration from {}", config_path);
            let config_str = fs::read_to_string(config_path)?;
            let config: FactoryConfig = toml::from_str(&config_str)?;
            Ok(config)
        } else {
            o_info!("📋 Creating default configuration at {}", config_path);
            let config = FactoryConfig::default();
            config.save(config_path)?;
            o_info!("💡 Edit {} to customize agent behavior", config_path);
            Ok(config)
        }
    }

    pub fn save(&self, config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = Path::new(config_path).parent() {
            fs::create_dir_all(parent)?;
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.goal.target.trim().is_empty() {
            return Err("goal.target must not be empty".to_string());
        }
        if self.planner.max_goal_attempts == 0 {
            return Err("max_goal_attempts must be greater than 0".to_string());
        }
        if self.state.history_capacity == 0 {
            return Err("history_capacity must be greater than 0".to_string());
        }
        if self.timing.cycle_delay_seconds == 0 {
            return Err("cycle_delay_seconds must be greater than 0".to_string());
        }
        if self.environment.base_url.trim().is_empty() {
            return Err("environment.base_url must not be empty".to_string());
        }
        Ok(())
    }

    pub fn print_summary(&self) {
        o_info!("📋 Configuration Summary:");
        o_info!("   🎯 Target goal: {}", self.goal.target);
        o_info!("   🔁 Max goal attempts: {}", self.planner.max_goal_attempts);
        o_info!("   🌐 Environment: {}", self.environment.base_url);
        o_info!("   ⏰ Cycle delay: {}s", self.timing.cycle_delay_seconds);
        o_info!(
            "   🔄 Config reload: {}s",
            self.timing.config_reload_interval_seconds
        );
    }
}

/// Hot-reloadable configuration manager
#[derive(Debug)]
pub struct ConfigManager {
    config: FactoryConfig,
    config_path: String,
    last_modified: Option<SystemTime>,
    last_reload_check: SystemTime,
}

impl ConfigManager {
    pub fn new(config_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = FactoryConfig::load_or_create(config_path)?;
        config.validate()?;
        config.print_summary();

        let last_modified = fs::metadata(config_path).and_then(|m| m.modified()).ok();

        Ok(ConfigManager {
            config,
            config_path: config_path.to_string(),
            last_modified,
            last_reload_check: SystemTime::now(),
        })
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Reload when the file changed on disk; returns true on a successful
    /// reload. An invalid new config keeps the current one.
    pub fn check_and_reload(&mut self) -> bool {
        let now = SystemTime::now();
        let reload_interval =
            std::time::Duration::from_secs(self.config.timing.config_reload_interval_seconds);

        if now
            .duration_since(self.last_reload_check)
            .unwrap_or_default()
            < reload_interval
        {
            return false;
        }
        self.last_reload_check = now;

        if let Ok(metadata) = fs::metadata(&self.config_path) {
            if let Ok(modified) = metadata.modified() {
                if Some(modified) != self.last_modified {
                    return self.reload_config(modified);
                }
            }
        }

        false
    }

    fn reload_config(&mut self, new_modified_time: SystemTime) -> bool {
        match FactoryConfig::load_or_create(&self.config_path) {
            Ok(new_config) => match new_config.validate() {
                Ok(_) => {
                    self.config = new_config;
                    self.last_modified = Some(new_modified_time);
                    o_info!("🔄 Configuration reloaded successfully!");
                    true
                }
                Err(e) => {
                    o_info!("⚠️ Invalid configuration detected, keeping current config: {}", e);
                    false
                }
            },
            Err(e) => {
                o_info!("⚠️ Failed to reload configuration, keeping current config: {}", e);
                false
            }
        }
    }
}
