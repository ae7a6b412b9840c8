//! Decomposition methods for the crafting tasks.

use std::collections::BTreeSet;
use std::sync::Arc;

use htn_core::AgentId;
use htn_planner::Method;

use crate::id::ItemId;
use crate::recipe::CompiledRecipe;
use crate::state::CraftState;
use crate::task::CraftTask;

/// `have_enough` when the agent already holds at least the requested count: nothing to do.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckEnough;

impl<A: AgentId> Method<CraftState<A>, CraftTask<A>> for CheckEnough {
    fn name(&self) -> &str {
        "check_enough"
    }

    fn decompose(&self, state: &CraftState<A>, task: &CraftTask<A>) -> Option<Vec<CraftTask<A>>> {
        match task {
            CraftTask::HaveEnough { agent, item, count } if state.get(item, agent) >= *count => {
                Some(Vec::new())
            }
            _ => None,
        }
    }
}

/// `have_enough` otherwise: produce one batch, then check again.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProduceEnough;

impl<A: AgentId> Method<CraftState<A>, CraftTask<A>> for ProduceEnough {
    fn name(&self) -> &str {
        "produce_enough"
    }

    fn decompose(&self, _state: &CraftState<A>, task: &CraftTask<A>) -> Option<Vec<CraftTask<A>>> {
        match task {
            CraftTask::HaveEnough { agent, item, count } => Some(vec![
                CraftTask::produce(agent.clone(), item.clone()),
                CraftTask::have_enough(agent.clone(), item.clone(), *count),
            ]),
            _ => None,
        }
    }
}

/// `produce` hands off to the product-specific recipe methods. Not applicable to items no
/// recipe produces.
#[derive(Debug, Clone, Default)]
pub struct DispatchProduce {
    producible: BTreeSet<ItemId>,
}

impl DispatchProduce {
    pub fn new(producible: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            producible: producible.into_iter().collect(),
        }
    }

    pub fn can_produce(&self, item: &ItemId) -> bool {
        self.producible.contains(item)
    }
}

impl<A: AgentId> Method<CraftState<A>, CraftTask<A>> for DispatchProduce {
    fn name(&self) -> &str {
        "produce"
    }

    fn decompose(&self, _state: &CraftState<A>, task: &CraftTask<A>) -> Option<Vec<CraftTask<A>>> {
        match task {
            CraftTask::Produce { agent, item } if self.can_produce(item) => {
                Some(vec![CraftTask::produce_item(agent.clone(), item.clone())])
            }
            _ => None,
        }
    }
}

/// One way of producing an item: secure every requirement and ingredient, then run the recipe.
/// Always applicable; the subtasks fail if the inventory cannot be reached.
#[derive(Debug, Clone)]
pub struct RecipeMethod {
    name: String,
    recipe: Arc<CompiledRecipe>,
}

impl RecipeMethod {
    pub fn new(recipe: Arc<CompiledRecipe>) -> Self {
        Self {
            name: format!("produce_{}_via_{}", recipe.product, recipe.name.replace(' ', "_")),
            recipe,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn product(&self) -> &ItemId {
        &self.recipe.product
    }

    pub fn time(&self) -> i64 {
        self.recipe.time
    }

    pub fn recipe(&self) -> &CompiledRecipe {
        &self.recipe
    }

    pub fn subtasks<A: Clone>(&self, agent: &A) -> Vec<CraftTask<A>> {
        self.recipe
            .preconditions()
            .map(|(item, count)| CraftTask::have_enough(agent.clone(), item.clone(), *count))
            .chain(std::iter::once(CraftTask::apply(
                agent.clone(),
                self.recipe.operator.clone(),
            )))
            .collect()
    }
}

impl<A: AgentId> Method<CraftState<A>, CraftTask<A>> for RecipeMethod {
    fn name(&self) -> &str {
        &self.name
    }

    fn decompose(&self, _state: &CraftState<A>, task: &CraftTask<A>) -> Option<Vec<CraftTask<A>>> {
        match task {
            CraftTask::ProduceItem { agent, item } if *item == self.recipe.product => {
                Some(self.subtasks(agent))
            }
            _ => None,
        }
    }
}
