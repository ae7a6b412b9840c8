//! HTN domain for a crafting economy.
//!
//! A [`Catalog`] of items, tools and recipes is compiled into a [`CraftingDomain`]: one
//! operator per recipe, one ordered method group per product, the shared `have_enough` and
//! `produce` methods, and a [`CraftHeuristic`] that keeps the search away from unproductive
//! tool detours. Planning itself is done by `htn-planner`.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod heuristic;
pub mod id;
pub mod method;
pub mod operator;
pub mod recipe;
pub mod state;
pub mod task;

pub use catalog::{Catalog, Recipe};
pub use config::{CostCutoff, DomainConfig, HeuristicConfig};
pub use domain::{CraftPlanner, CraftSolution, CraftingDomain};
pub use error::{CatalogError, StateError};
pub use heuristic::{CraftHeuristic, PruneReason};
pub use id::{ItemId, OperatorName, TIME};
pub use method::{CheckEnough, DispatchProduce, ProduceEnough, RecipeMethod};
pub use operator::{OperatorRefusal, RecipeOperator};
pub use recipe::CompiledRecipe;
pub use state::CraftState;
pub use task::{CraftTask, TaskKey};

pub use htn_planner::{HtnPlannerConfig, PlanError};
