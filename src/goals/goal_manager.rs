// Goal Manager - tracks the goal tree and decides what to work on next
use crate::goals::{Goal, GoalSelection, GoalStatus};
use crate::models::WorldState;
use crate::o_info;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

pub struct GoalManager {
    target: String,
    /// Declaration order is preserved; it is the final tie-break.
    goals: Vec<Goal>,
    index: HashMap<String, usize>,
    completed: HashSet<String>,
    max_attempts: u32,
}

impl GoalManager {
    pub fn new(target: &str, goals: Vec<Goal>) -> Self {
        let index = goals
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id.clone(), i))
            .collect();
        GoalManager {
            target: target.to_string(),
            goals,
            index,
            completed: HashSet::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.index.get(id).map(|i| &self.goals[*i])
    }

    /// Pick the next goal to pursue, or report the terminal condition.
    ///
    /// Selection order: recompute completion for every goal against the
    /// state (goals can complete opportunistically, without ever being
    /// worked on), then rank the workable candidates - goals on the
    /// target's prerequisite closure strictly outrank off-path goals,
    /// higher priority wins within a tier, and declaration order breaks
    /// the remaining ties.
    pub fn get_current_goal(&mut self, state: &WorldState) -> GoalSelection {
        self.update_completions(state);

        if self.completed.contains(&self.target) {
            return GoalSelection::Complete;
        }

        self.update_blocked();

        let on_path = self.dependency_closure(&self.target);

        let mut candidates: Vec<usize> = (0..self.goals.len())
            .filter(|&i| self.is_candidate(i))
            .collect();

        if candidates.is_empty() {
            return GoalSelection::Stuck;
        }

        // Stable sort over declaration order
        candidates.sort_by_key(|&i| {
            let goal = &self.goals[i];
            let path_rank = if on_path.contains(&goal.id) { 0u8 } else { 1u8 };
            (path_rank, std::cmp::Reverse(goal.priority))
        });

        let chosen = candidates[0];
        self.goals[chosen].status = GoalStatus::InProgress;
        GoalSelection::Work(self.goals[chosen].clone())
    }

    fn is_candidate(&self, i: usize) -> bool {
        let goal = &self.goals[i];
        if self.completed.contains(&goal.id) {
            return false;
        }
        if goal.is_permanently_failed(self.max_attempts) {
            return false;
        }
        if goal.status == GoalStatus::Blocked {
            return false;
        }
        goal.requires.iter().all(|req| self.completed.contains(req))
    }

    /// Mark any goal whose criteria the state now satisfies as completed.
    fn update_completions(&mut self, state: &WorldState) {
        for goal in &mut self.goals {
            if !self.completed.contains(&goal.id) && goal.check_completion(state) {
                self.completed.insert(goal.id.clone());
                goal.status = GoalStatus::Completed;
                o_info!("✅ Goal completed: {}", goal.name);
            }
        }
    }

    /// A goal whose prerequisite closure contains a permanently failed
    /// goal can never become workable; mark the whole branch blocked.
    fn update_blocked(&mut self) {
        let dead: HashSet<String> = self
            .goals
            .iter()
            .filter(|g| g.is_permanently_failed(self.max_attempts))
            .map(|g| g.id.clone())
            .collect();
        if dead.is_empty() {
            return;
        }

        let blocked: Vec<usize> = (0..self.goals.len())
            .filter(|&i| {
                let goal = &self.goals[i];
                !self.completed.contains(&goal.id)
                    && !dead.contains(&goal.id)
                    && self
                        .dependency_closure(&goal.id)
                        .iter()
                        .any(|dep| *dep != goal.id && dead.contains(dep))
            })
            .collect();

        for i in blocked {
            self.goals[i].status = GoalStatus::Blocked;
        }
    }

    /// Every goal id reachable by recursively walking `requires` from the
    /// given goal, the goal itself included.
    pub fn dependency_closure(&self, goal_id: &str) -> HashSet<String> {
        let mut closure = HashSet::new();
        let mut stack = vec![goal_id.to_string()];
        while let Some(id) = stack.pop() {
            if !closure.insert(id.clone()) {
                continue;
            }
            if let Some(goal) = self.goal(&id) {
                stack.extend(goal.requires.iter().cloned());
            }
        }
        closure
    }

    pub fn mark_complete(&mut self, goal_id: &str) {
        if let Some(&i) = self.index.get(goal_id) {
            self.completed.insert(goal_id.to_string());
            self.goals[i].status = GoalStatus::Completed;
        }
    }

    /// Record a failed attempt. At the attempt limit the goal becomes
    /// permanently failed; before that it returns to pending for retry.
    pub fn mark_failed(&mut self, goal_id: &str) {
        if let Some(&i) = self.index.get(goal_id) {
            let goal = &mut self.goals[i];
            goal.attempts += 1;
            if goal.attempts >= self.max_attempts {
                goal.status = GoalStatus::Failed;
                o_info!(
                    "🚫 Goal permanently failed after {} attempts: {}",
                    goal.attempts,
                    goal.name
                );
            } else {
                goal.status = GoalStatus::Pending;
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed.contains(&self.target)
    }

    pub fn progress(&self) -> GoalProgress {
        let on_path = self.dependency_closure(&self.target);
        let completed: Vec<String> = on_path
            .iter()
            .filter(|id| self.completed.contains(*id))
            .cloned()
            .collect();
        let mut remaining: Vec<String> = on_path
            .iter()
            .filter(|id| !self.completed.contains(*id))
            .cloned()
            .collect();
        remaining.sort();

        GoalProgress {
            target: self.target.clone(),
            total_goals: on_path.len(),
            completed_goals: completed.len(),
            percentage: completed.len() as f64 / on_path.len().max(1) as f64 * 100.0,
            remaining,
        }
    }

    /// Human-readable tree summary grouped by category, in declaration
    /// order.
    pub fn tree_summary(&self) -> String {
        let progress = self.progress();
        let mut lines = vec![
            format!("🎯 Target: {}", self.target),
            format!(
                "Progress: {}/{} ({:.0}%)",
                progress.completed_goals, progress.total_goals, progress.percentage
            ),
        ];

        let mut categories: Vec<&str> = Vec::new();
        for goal in &self.goals {
            if !categories.contains(&goal.category.as_str()) {
                categories.push(&goal.category);
            }
        }

        for category in categories {
            lines.push(format!("📁 {}", category.to_uppercase()));
            for goal in self.goals.iter().filter(|g| g.category == category) {
                let marker = if self.completed.contains(&goal.id) {
                    "✅"
                } else if goal.is_permanently_failed(self.max_attempts) {
                    "🚫"
                } else if goal.status == GoalStatus::Blocked {
                    "⛔"
                } else {
                    "⬜"
                };
                lines.push(format!("  {} {}", marker, goal.name));
            }
        }

        lines.join("\n")
    }
}

#[derive(Debug, Clone)]
pub struct GoalProgress {
    pub target: String,
    pub total_goals: usize,
    pub completed_goals: usize,
    pub percentage: f64,
    pub remaining: Vec<String>,
}
