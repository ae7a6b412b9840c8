//! Recipe operators: check preconditions, then apply the recipe's deltas all at once.

use std::sync::Arc;

use htn_core::AgentId;
use htn_planner::{Operator, Refused};

use crate::error::StateError;
use crate::id::{ItemId, OperatorName};
use crate::recipe::CompiledRecipe;
use crate::state::CraftState;
use crate::task::CraftTask;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperatorRefusal {
    #[error("requires {need} {item}, has {have}")]
    MissingRequirement { item: ItemId, need: i64, have: i64 },

    #[error("consumes {need} {item}, has {have}")]
    MissingIngredient { item: ItemId, need: i64, have: i64 },

    #[error("takes {need} time, {have} left")]
    OutOfTime { need: i64, have: i64 },

    #[error("agent {agent} has no inventory in this state")]
    UnknownAgent { agent: String },

    #[error("task is not an application of this operator")]
    WrongTask,

    #[error(transparent)]
    State(#[from] StateError),
}

#[derive(Debug, Clone)]
pub struct RecipeOperator {
    recipe: Arc<CompiledRecipe>,
    deltas: Vec<(ItemId, i64)>,
}

impl RecipeOperator {
    pub fn new(recipe: Arc<CompiledRecipe>) -> Self {
        let deltas = recipe.deltas();
        Self { recipe, deltas }
    }

    pub fn operator_name(&self) -> &OperatorName {
        &self.recipe.operator
    }

    pub fn recipe(&self) -> &CompiledRecipe {
        &self.recipe
    }

    /// Why `agent` cannot run this recipe in `state`, if it cannot.
    pub fn check<A: AgentId>(
        &self,
        state: &CraftState<A>,
        agent: &A,
    ) -> Result<(), OperatorRefusal> {
        if !state.has_agent(agent) {
            return Err(OperatorRefusal::UnknownAgent {
                agent: format!("{agent:?}"),
            });
        }
        for (item, need) in &self.recipe.requires {
            let have = state.get(item, agent);
            if have < *need {
                return Err(OperatorRefusal::MissingRequirement {
                    item: item.clone(),
                    need: *need,
                    have,
                });
            }
        }
        for (item, need) in &self.recipe.consumes {
            let have = state.get(item, agent);
            if have < *need {
                return Err(OperatorRefusal::MissingIngredient {
                    item: item.clone(),
                    need: *need,
                    have,
                });
            }
        }
        let have = state.time(agent);
        if have < self.recipe.time {
            return Err(OperatorRefusal::OutOfTime {
                need: self.recipe.time,
                have,
            });
        }
        Ok(())
    }

    /// Run the recipe for `agent`. On refusal `state` is unchanged.
    pub fn apply_to<A: AgentId>(
        &self,
        state: &mut CraftState<A>,
        agent: &A,
    ) -> Result<(), OperatorRefusal> {
        self.check(state, agent)?;
        state.apply_deltas(agent, &self.deltas)?;
        Ok(())
    }
}

impl<A: AgentId> Operator<CraftState<A>, CraftTask<A>> for RecipeOperator {
    fn name(&self) -> &str {
        self.recipe.operator.as_str()
    }

    fn apply(&self, state: &mut CraftState<A>, task: &CraftTask<A>) -> Result<(), Refused> {
        let result = match task {
            CraftTask::Apply { agent, operator } if *operator == self.recipe.operator => {
                self.apply_to(state, agent)
            }
            _ => Err(OperatorRefusal::WrongTask),
        };
        result.map_err(|refusal| {
            tracing::trace!(operator = %self.recipe.operator, %refusal, "recipe refused");
            Refused::new(refusal.to_string())
        })
    }
}
