use indexmap::IndexMap;

use crate::catalog::Recipe;
use crate::error::CatalogError;
use crate::id::{ItemId, OperatorName};

/// A catalog recipe resolved into the shape the operator and method share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRecipe {
    pub name: String,
    pub operator: OperatorName,
    pub product: ItemId,
    pub time: i64,
    pub requires: Vec<(ItemId, i64)>,
    /// Consumed items in crafting order.
    pub consumes: Vec<(ItemId, i64)>,
    pub produces: Vec<(ItemId, i64)>,
}

impl CompiledRecipe {
    pub fn compile(
        name: &str,
        recipe: &Recipe,
        crafting_order: &[ItemId],
    ) -> Result<Self, CatalogError> {
        let product = recipe.product().cloned().ok_or_else(|| CatalogError::NoProduct {
            recipe: name.to_string(),
        })?;

        Ok(Self {
            name: name.to_string(),
            operator: OperatorName::for_recipe(name),
            product,
            time: recipe.time,
            requires: pairs(&recipe.requires),
            consumes: in_crafting_order(&recipe.consumes, crafting_order),
            produces: pairs(&recipe.produces),
        })
    }

    /// Inventory changes applied when the recipe runs, `time` included.
    pub fn deltas(&self) -> Vec<(ItemId, i64)> {
        self.consumes
            .iter()
            .map(|(item, n)| (item.clone(), -n))
            .chain(self.produces.iter().cloned())
            .chain(std::iter::once((ItemId::time(), -self.time)))
            .collect()
    }

    /// The `have_enough` goals a recipe method establishes before running the operator:
    /// requirements in declared order, then consumed items in crafting order.
    pub fn preconditions(&self) -> impl Iterator<Item = &(ItemId, i64)> {
        self.requires.iter().chain(&self.consumes)
    }
}

fn pairs(amounts: &IndexMap<ItemId, i64>) -> Vec<(ItemId, i64)> {
    amounts
        .iter()
        .map(|(item, amount)| (item.clone(), *amount))
        .collect()
}

/// Items named in `crafting_order` first, in that order; the rest keep their declared order.
fn in_crafting_order(
    consumes: &IndexMap<ItemId, i64>,
    crafting_order: &[ItemId],
) -> Vec<(ItemId, i64)> {
    let listed = crafting_order
        .iter()
        .filter_map(|item| consumes.get(item).map(|n| (item.clone(), *n)));
    let unlisted = consumes
        .iter()
        .filter(|(item, _)| !crafting_order.contains(item))
        .map(|(item, n)| (item.clone(), *n));
    listed.chain(unlisted).collect()
}
