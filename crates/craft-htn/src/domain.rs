use std::collections::BTreeMap;
use std::sync::Arc;

use htn_core::AgentId;
use htn_planner::{HtnDomain, HtnPlanner, HtnPlannerConfig, Method, PlanError, Solution};
use htn_tools::TraceSink;

use crate::catalog::Catalog;
use crate::config::DomainConfig;
use crate::error::CatalogError;
use crate::heuristic::CraftHeuristic;
use crate::id::ItemId;
use crate::method::{CheckEnough, DispatchProduce, ProduceEnough, RecipeMethod};
use crate::operator::RecipeOperator;
use crate::recipe::CompiledRecipe;
use crate::state::CraftState;
use crate::task::{CraftTask, TaskKey};

pub type CraftPlanner<'d, A> = HtnPlanner<'d, CraftState<A>, CraftTask<A>>;
pub type CraftSolution<A> = Solution<CraftState<A>, CraftTask<A>>;

type BoxedMethod<A> = Box<dyn Method<CraftState<A>, CraftTask<A>>>;

/// A recipe catalog compiled into HTN handler tables.
///
/// Registers one operator per recipe, one method group per product (ordered by recipe time,
/// ties in declaration order), the shared `have_enough`/`produce` methods and the crafting
/// heuristic.
pub struct CraftingDomain<A: AgentId> {
    catalog: Catalog,
    config: DomainConfig,
    operators: Vec<RecipeOperator>,
    groups: BTreeMap<ItemId, Vec<RecipeMethod>>,
    heuristic: CraftHeuristic<A>,
    htn: HtnDomain<CraftState<A>, CraftTask<A>>,
}

impl<A: AgentId> CraftingDomain<A> {
    pub fn compile(catalog: &Catalog, config: &DomainConfig) -> Result<Self, CatalogError> {
        catalog.validate()?;

        let recipes = catalog
            .recipes
            .iter()
            .map(|(name, recipe)| {
                CompiledRecipe::compile(name, recipe, &config.crafting_order).map(Arc::new)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let operators: Vec<RecipeOperator> =
            recipes.iter().cloned().map(RecipeOperator::new).collect();

        let mut groups: BTreeMap<ItemId, Vec<RecipeMethod>> = BTreeMap::new();
        for recipe in &recipes {
            groups
                .entry(recipe.product.clone())
                .or_default()
                .push(RecipeMethod::new(Arc::clone(recipe)));
        }
        for group in groups.values_mut() {
            group.sort_by_key(RecipeMethod::time);
        }

        let heuristic = CraftHeuristic::new(catalog, config.heuristic.clone());

        let mut htn: HtnDomain<CraftState<A>, CraftTask<A>> = HtnDomain::new();
        for operator in &operators {
            htn.declare_operator(
                TaskKey::Operator(operator.operator_name().clone()),
                operator.clone(),
            );
        }
        let have_enough: Vec<BoxedMethod<A>> = vec![Box::new(CheckEnough), Box::new(ProduceEnough)];
        htn.declare_methods(TaskKey::HaveEnough, have_enough);
        htn.add_method(TaskKey::Produce, DispatchProduce::new(groups.keys().cloned()));
        for (product, group) in &groups {
            let methods = group
                .iter()
                .cloned()
                .map(|method| Box::new(method) as BoxedMethod<A>)
                .collect();
            htn.declare_methods(TaskKey::ProduceItem(product.clone()), methods);
        }
        htn.add_check(heuristic.clone());

        tracing::info!(
            recipes = recipes.len(),
            products = groups.len(),
            tools = catalog.tools.len(),
            "compiled crafting domain"
        );

        Ok(Self {
            catalog: catalog.clone(),
            config: config.clone(),
            operators,
            groups,
            heuristic,
            htn,
        })
    }

    pub fn with_defaults(catalog: &Catalog) -> Result<Self, CatalogError> {
        Self::compile(catalog, &DomainConfig::default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &DomainConfig {
        &self.config
    }

    pub fn htn(&self) -> &HtnDomain<CraftState<A>, CraftTask<A>> {
        &self.htn
    }

    pub fn heuristic(&self) -> &CraftHeuristic<A> {
        &self.heuristic
    }

    /// Operators in recipe declaration order.
    pub fn operators(&self) -> &[RecipeOperator] {
        &self.operators
    }

    pub fn operator(&self, name: &str) -> Option<&RecipeOperator> {
        self.operators
            .iter()
            .find(|operator| operator.operator_name().as_str() == name)
    }

    /// The method group for `item`, in the order the planner tries it.
    pub fn recipe_methods(&self, item: &str) -> &[RecipeMethod] {
        self.groups.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn products(&self) -> impl Iterator<Item = &ItemId> {
        self.groups.keys()
    }

    /// The catalog's initial inventory for `agent`, with `time` as its budget.
    pub fn initial_state(&self, agent: A, time: i64) -> CraftState<A> {
        let mut state = CraftState::new("state", self.catalog.tracked_items());
        state.seed_agent(agent, &self.catalog.initial, time);
        state
    }

    /// One `have_enough` task per goal entry, in declaration order.
    pub fn goal_tasks(&self, agent: &A) -> Vec<CraftTask<A>> {
        self.catalog
            .goal
            .iter()
            .map(|(item, count)| CraftTask::have_enough(agent.clone(), item.clone(), *count))
            .collect()
    }

    pub fn planner(&self, config: HtnPlannerConfig) -> CraftPlanner<'_, A> {
        HtnPlanner::new(&self.htn).with_config(config)
    }

    /// Plan the catalog goal for `agent` from the catalog's initial inventory.
    pub fn solve(
        &self,
        agent: A,
        time: i64,
        config: HtnPlannerConfig,
    ) -> Result<CraftSolution<A>, PlanError> {
        let root = self.goal_tasks(&agent);
        let start = self.initial_state(agent, time);
        self.planner(config).solve(&start, &root)
    }

    pub fn solve_traced(
        &self,
        agent: A,
        time: i64,
        config: HtnPlannerConfig,
        sink: &mut dyn TraceSink,
    ) -> Result<CraftSolution<A>, PlanError> {
        let root = self.goal_tasks(&agent);
        let start = self.initial_state(agent, time);
        self.planner(config).solve_traced(&start, &root, sink)
    }
}
