//! Search pruning for the crafting domain.
//!
//! Rules are evaluated in a fixed order on the task about to be expanded:
//!
//! 1. depth past `max_depth`
//! 2. producing a tool that is already being produced further up the path
//! 3. producing a goal item is never pruned
//! 4. producing a tool whose weighted outstanding demand is at or below its cutoff
//! 5. the same task as the last `max_repetitions` ancestors

use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;

use htn_core::AgentId;
use htn_planner::{PruneCheck, SearchContext};

use crate::catalog::Catalog;
use crate::config::{CostCutoff, HeuristicConfig};
use crate::id::ItemId;
use crate::state::CraftState;
use crate::task::CraftTask;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneReason {
    DepthLimit { depth: usize },
    ToolCycle { tool: ItemId },
    BelowCutoff { tool: ItemId, demand: i64, threshold: i64 },
    Repetition,
}

impl fmt::Display for PruneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthLimit { depth } => write!(f, "depth {depth} over limit"),
            Self::ToolCycle { tool } => write!(f, "{tool} already being produced"),
            Self::BelowCutoff {
                tool,
                demand,
                threshold,
            } => write!(f, "{tool} demand {demand} <= {threshold}"),
            Self::Repetition => f.write_str("task repeating"),
        }
    }
}

pub struct CraftHeuristic<A> {
    goals: BTreeSet<ItemId>,
    tools: BTreeSet<ItemId>,
    config: HeuristicConfig,
    _agent: PhantomData<fn() -> A>,
}

impl<A> Clone for CraftHeuristic<A> {
    fn clone(&self) -> Self {
        Self {
            goals: self.goals.clone(),
            tools: self.tools.clone(),
            config: self.config.clone(),
            _agent: PhantomData,
        }
    }
}

impl<A> fmt::Debug for CraftHeuristic<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CraftHeuristic")
            .field("goals", &self.goals)
            .field("tools", &self.tools)
            .field("config", &self.config)
            .finish()
    }
}

impl<A: AgentId> CraftHeuristic<A> {
    pub fn new(catalog: &Catalog, config: HeuristicConfig) -> Self {
        Self {
            goals: catalog.goal.keys().cloned().collect(),
            tools: catalog.tools.iter().cloned().collect(),
            config,
            _agent: PhantomData,
        }
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    pub fn should_prune(
        &self,
        task: &CraftTask<A>,
        remaining: &[CraftTask<A>],
        depth: usize,
        ancestors: &[CraftTask<A>],
    ) -> bool {
        self.evaluate(task, remaining, depth, ancestors).is_some()
    }

    /// The first rule that prunes `task`, if any.
    pub fn evaluate(
        &self,
        task: &CraftTask<A>,
        remaining: &[CraftTask<A>],
        depth: usize,
        ancestors: &[CraftTask<A>],
    ) -> Option<PruneReason> {
        if depth > self.config.max_depth {
            return Some(PruneReason::DepthLimit { depth });
        }

        if let CraftTask::Produce { item, .. } = task {
            if self.tools.contains(item) && ancestors.contains(task) {
                return Some(PruneReason::ToolCycle { tool: item.clone() });
            }
            if self.goals.contains(item) {
                return None;
            }
            if let Some(cutoff) = self.config.cutoffs.get(item) {
                let demand = outstanding_demand(cutoff, remaining);
                if demand <= cutoff.threshold {
                    return Some(PruneReason::BelowCutoff {
                        tool: item.clone(),
                        demand,
                        threshold: cutoff.threshold,
                    });
                }
            }
        }

        let window = self.config.max_repetitions;
        if window > 0
            && ancestors.len() > window
            && ancestors[ancestors.len() - window..].iter().all(|a| a == task)
        {
            return Some(PruneReason::Repetition);
        }

        None
    }
}

/// Weighted sum of the `have_enough` counts still pending for the cutoff's items. Saturates
/// instead of overflowing.
pub fn outstanding_demand<A>(cutoff: &CostCutoff, remaining: &[CraftTask<A>]) -> i64 {
    remaining
        .iter()
        .filter_map(|task| match task {
            CraftTask::HaveEnough { item, count, .. } => {
                cutoff.weights.get(item).map(|weight| weight.saturating_mul(*count))
            }
            _ => None,
        })
        .fold(0, i64::saturating_add)
}

impl<A: AgentId> PruneCheck<CraftState<A>, CraftTask<A>> for CraftHeuristic<A> {
    fn should_prune(&self, ctx: &SearchContext<'_, CraftState<A>, CraftTask<A>>) -> bool {
        match self.evaluate(ctx.task, ctx.remaining, ctx.depth, ctx.ancestors) {
            Some(reason) => {
                tracing::trace!(task = %ctx.task, depth = ctx.depth, %reason, "heuristic pruned");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Recipe;

    type Task = CraftTask<&'static str>;

    const AGENT: &str = "agent";

    fn heuristic() -> CraftHeuristic<&'static str> {
        let catalog = Catalog::new()
            .item("wood")
            .item("plank")
            .item("coal")
            .item("ingot")
            .item("cobble")
            .tool("iron_pickaxe")
            .tool("wooden_axe")
            .tool("bench")
            .goal("plank", 1)
            .recipe("punch for wood", Recipe::new(4).produces("wood", 1));
        CraftHeuristic::new(&catalog, HeuristicConfig::default())
    }

    fn produce(item: &str) -> Task {
        CraftTask::produce(AGENT, item)
    }

    fn enough(item: &str, count: i64) -> Task {
        CraftTask::have_enough(AGENT, item, count)
    }

    #[test]
    fn depth_limit_prunes_everything() {
        let h = heuristic();
        assert_eq!(
            h.evaluate(&enough("wood", 1), &[], 901, &[]),
            Some(PruneReason::DepthLimit { depth: 901 })
        );
        assert!(!h.should_prune(&enough("wood", 1), &[], 900, &[]));
    }

    #[test]
    fn tool_already_on_the_path_is_not_produced_again() {
        let h = heuristic();
        let ancestors = vec![produce("bench"), enough("plank", 4), produce("plank")];
        assert_eq!(
            h.evaluate(&produce("bench"), &[], 3, &ancestors),
            Some(PruneReason::ToolCycle { tool: "bench".into() })
        );
        // Plain items may recur.
        let ancestors = vec![produce("plank"), enough("wood", 1)];
        assert!(!h.should_prune(&produce("plank"), &[], 2, &ancestors));
    }

    #[test]
    fn goal_items_bypass_cutoffs_and_repetition() {
        let h = heuristic();
        let ancestors = vec![produce("plank"); 12];
        assert!(!h.should_prune(&produce("plank"), &[], 12, &ancestors));
    }

    #[test]
    fn tool_cutoff_weighs_pending_have_enough_tasks() {
        let h = heuristic();
        // ingot counts double: 2*4 + 1*3 + 1*5 = 16 <= 18.
        let remaining = vec![
            enough("ingot", 4),
            enough("coal", 3),
            enough("cobble", 5),
            produce("wood"),
        ];
        assert_eq!(
            h.evaluate(&produce("iron_pickaxe"), &remaining, 1, &[]),
            Some(PruneReason::BelowCutoff {
                tool: "iron_pickaxe".into(),
                demand: 16,
                threshold: 18,
            })
        );

        // 2*6 + 3 + 5 = 20 > 18.
        let remaining = vec![enough("ingot", 6), enough("coal", 3), enough("cobble", 5)];
        assert!(!h.should_prune(&produce("iron_pickaxe"), &remaining, 1, &[]));
    }

    #[test]
    fn cutoff_is_inclusive() {
        let h = heuristic();
        let remaining = vec![enough("wood", 4), enough("plank", 6)];
        assert!(h.should_prune(&produce("wooden_axe"), &remaining, 1, &[]));

        let remaining = vec![enough("wood", 5), enough("plank", 6)];
        assert!(!h.should_prune(&produce("wooden_axe"), &remaining, 1, &[]));
    }

    #[test]
    fn huge_demand_saturates_instead_of_overflowing() {
        let h = heuristic();
        let remaining = vec![enough("ingot", i64::MAX), enough("coal", i64::MAX)];
        let cutoff = &h.config().cutoffs["iron_pickaxe"];
        assert_eq!(outstanding_demand(cutoff, &remaining), i64::MAX);
        assert!(!h.should_prune(&produce("iron_pickaxe"), &remaining, 1, &[]));
    }

    #[test]
    fn repetition_needs_a_full_window_of_identical_ancestors() {
        let h = heuristic();
        let task = enough("wood", 1);

        let eleven = vec![task.clone(); 11];
        assert_eq!(h.evaluate(&task, &[], 11, &eleven), Some(PruneReason::Repetition));

        // Exactly ten ancestors is not enough history.
        let ten = vec![task.clone(); 10];
        assert!(!h.should_prune(&task, &[], 10, &ten));

        let nine = vec![task.clone(); 9];
        assert!(!h.should_prune(&task, &[], 9, &nine));

        let mut broken = vec![task.clone(); 11];
        broken[5] = enough("wood", 2);
        assert!(!h.should_prune(&task, &[], 11, &broken));
    }
}
