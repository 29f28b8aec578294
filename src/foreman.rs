// Foreman - high-level autonomous factory loop orchestration
use crate::config::{ConfigManager, FactoryConfig};
use crate::environment::FactoryEnvironment;
use crate::goals::{Goal, GoalManager, GoalSelection};
use crate::models::WorldState;
use crate::operations::{StateTracker, TaskPlanner};
use crate::storage::{self, RecipeDatabase};
use crate::{o_debug, o_error, o_info, o_summary};

/// What one autonomous cycle achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Worked a goal and executed this many actions.
    Progressed { goal_id: String, actions_run: usize },
    /// The goal's plan could not be executed; a failed attempt was recorded.
    GoalFailed { goal_id: String },
    /// The target goal is satisfied. Terminal success.
    Complete,
    /// Unfinished goals remain but none can be worked. Terminal, distinct
    /// from success.
    Stuck,
}

/// Drives the whole show, one turn at a time: observe, pick a goal, plan
/// it, execute the plan action by action, and keep the goal bookkeeping
/// honest. Every collaborator is passed in at construction - the Foreman
/// holds the only mutable state and nothing here is global.
pub struct Foreman {
    env: Box<dyn FactoryEnvironment>,
    planner: TaskPlanner,
    goals: GoalManager,
    tracker: StateTracker,
    config: FactoryConfig,
    config_manager: Option<ConfigManager>,
}

impl Foreman {
    /// Build from config: loads the recipe table and goal tree from the
    /// configured paths (both degrade to built-ins when missing).
    pub fn new(env: Box<dyn FactoryEnvironment>, config: FactoryConfig) -> Self {
        let recipes = RecipeDatabase::load(&config.paths.recipes_file);
        let tree = storage::load_goal_tree(&config.paths.goal_tree_file);
        Self::with_parts(env, config, recipes, tree)
    }

    /// Build with explicit collaborators; used by tests and demos.
    pub fn with_parts(
        env: Box<dyn FactoryEnvironment>,
        config: FactoryConfig,
        recipes: RecipeDatabase,
        goal_tree: Vec<Goal>,
    ) -> Self {
        let goals = GoalManager::new(&config.goal.target, goal_tree)
            .with_max_attempts(config.planner.max_goal_attempts);
        let tracker = StateTracker::new(config.state.history_capacity);
        Foreman {
            env,
            planner: TaskPlanner::new(recipes),
            goals,
            tracker,
            config,
            config_manager: None,
        }
    }

    /// Attach a hot-reloading config manager; timing settings are picked
    /// up between cycles when the file changes on disk.
    pub fn with_hot_reload(mut self, manager: ConfigManager) -> Self {
        self.config_manager = Some(manager);
        self
    }

    pub fn state(&self) -> &WorldState {
        self.tracker.current()
    }

    pub fn goals(&self) -> &GoalManager {
        &self.goals
    }

    pub fn planner(&self) -> &TaskPlanner {
        &self.planner
    }

    /// One full turn: observe, select, plan, execute.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, Box<dyn std::error::Error>> {
        let observation = self.env.observe().await?;
        self.tracker.apply(&observation);

        let goal = match self.goals.get_current_goal(self.tracker.current()) {
            GoalSelection::Complete => {
                o_summary!("🎉 Target goal '{}' complete", self.goals.target());
                return Ok(CycleOutcome::Complete);
            }
            GoalSelection::Stuck => {
                o_summary!(
                    "🧱 No workable goal remains and '{}' is not complete - stuck",
                    self.goals.target()
                );
                return Ok(CycleOutcome::Stuck);
            }
            GoalSelection::Work(goal) => goal,
        };

        o_info!("🎯 Working goal: {} [{}]", goal.name, goal.id);
        let plan = self.planner.plan_goal(&goal, self.tracker.current());

        if plan.is_empty() {
            // Incomplete goal with nothing plannable: count it as a failed
            // attempt so an unachievable goal cannot spin forever.
            o_error!("❌ Goal '{}' produced an empty plan while unsatisfied", goal.id);
            self.goals.mark_failed(&goal.id);
            return Ok(CycleOutcome::GoalFailed { goal_id: goal.id });
        }

        o_debug!("📝 Plan for {}: {} action(s)", goal.id, plan.len());
        let mut actions_run = 0;

        for action in &plan {
            let call = action.to_skill_call();
            if call.is_noop() {
                o_debug!("⏭️ Skipping no-op action: {}", call);
                continue;
            }

            o_debug!("⚡ Executing: {}", call);
            match self.env.execute(&call).await {
                Ok(observation) => {
                    self.tracker.apply(&observation);
                    actions_run += 1;
                }
                Err(e) => {
                    o_error!("❌ Action failed ({}): {}", call, e);
                    self.goals.mark_failed(&goal.id);
                    return Ok(CycleOutcome::GoalFailed { goal_id: goal.id });
                }
            }

            // A goal can complete early - another action's side effects or
            // a generous observation may already satisfy it.
            if goal.check_completion(self.tracker.current()) {
                o_info!("🏁 Goal '{}' satisfied early, dropping rest of plan", goal.id);
                break;
            }
        }

        if goal.check_completion(self.tracker.current()) {
            self.goals.mark_complete(&goal.id);
            o_summary!("✅ {} ({} action(s))", goal.name, actions_run);
        } else {
            o_info!(
                "📦 Goal '{}' not yet satisfied after {} action(s); will re-plan next cycle",
                goal.id,
                actions_run
            );
        }

        Ok(CycleOutcome::Progressed {
            goal_id: goal.id,
            actions_run,
        })
    }

    /// Observe once, select the current goal and print its generated plan
    /// script without executing anything.
    pub async fn run_plan_preview(
        &mut self,
    ) -> Result<GoalSelection, Box<dyn std::error::Error>> {
        let observation = self.env.observe().await?;
        self.tracker.apply(&observation);

        let selection = self.goals.get_current_goal(self.tracker.current());
        if let GoalSelection::Work(goal) = &selection {
            let plan = self.planner.plan_goal(goal, self.tracker.current());
            println!("🎯 Current goal: {} [{}]", goal.name, goal.id);
            println!("{}", self.planner.generate_script(&plan));
        }
        Ok(selection)
    }

    /// Run cycles until the tree is complete or stuck, or the optional
    /// cycle cap is reached. Failed cycles back off and retry.
    pub async fn run_continuous(
        &mut self,
        max_cycles: Option<u64>,
    ) -> Result<CycleOutcome, Box<dyn std::error::Error>> {
        let mut cycle_count: u64 = 0;

        loop {
            cycle_count += 1;
            if let Some(limit) = max_cycles {
                if cycle_count > limit {
                    o_info!("⏹️ Cycle limit ({}) reached", limit);
                    return Ok(CycleOutcome::Stuck);
                }
            }

            if let Some(manager) = self.config_manager.as_mut() {
                if manager.check_and_reload() {
                    self.config = manager.config().clone();
                }
            }

            o_info!("\n🔄 ═══════ AUTONOMOUS CYCLE #{} ═══════", cycle_count);

            match self.run_cycle().await {
                Ok(outcome @ (CycleOutcome::Complete | CycleOutcome::Stuck)) => {
                    o_summary!("{}", self.goals.tree_summary());
                    crate::output_broker::get_output_broker().flush_summaries().await;
                    return Ok(outcome);
                }
                Ok(CycleOutcome::Progressed { goal_id, actions_run }) => {
                    o_debug!("✔️ Cycle #{}: {} ({} actions)", cycle_count, goal_id, actions_run);
                }
                Ok(CycleOutcome::GoalFailed { goal_id }) => {
                    o_info!(
                        "⏳ Cycle #{} failed on goal '{}', backing off {}s",
                        cycle_count,
                        goal_id,
                        self.config.timing.error_retry_delay_seconds
                    );
                    tokio::time::sleep(std::time::Duration::from_secs(
                        self.config.timing.error_retry_delay_seconds,
                    ))
                    .await;
                    continue;
                }
                Err(e) => {
                    o_error!("❌ Cycle #{} errored: {}", cycle_count, e);
                    tokio::time::sleep(std::time::Duration::from_secs(
                        self.config.timing.error_retry_delay_seconds,
                    ))
                    .await;
                    continue;
                }
            }

            tokio::time::sleep(std::time::Duration::from_secs(
                self.config.timing.cycle_delay_seconds,
            ))
            .await;
        }
    }
}
