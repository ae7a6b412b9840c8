//! Recipe catalog as loaded from JSON or YAML.
//!
//! Top-level keys are `Items`, `Tools`, `Initial`, `Goal` and `Recipes`; every recipe has
//! optional `Requires`/`Consumes`, a `Produces` map and a `Time` cost. Requirement amounts may
//! be written as `true`, which counts as one.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::id::{ItemId, OperatorName};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Recipe {
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "amounts::deserialize"
    )]
    pub requires: IndexMap<ItemId, i64>,

    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "amounts::deserialize"
    )]
    pub consumes: IndexMap<ItemId, i64>,

    #[serde(default, deserialize_with = "amounts::deserialize")]
    pub produces: IndexMap<ItemId, i64>,

    pub time: i64,
}

impl Recipe {
    pub fn new(time: i64) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    pub fn requires(mut self, item: impl Into<ItemId>, amount: i64) -> Self {
        self.requires.insert(item.into(), amount);
        self
    }

    pub fn consumes(mut self, item: impl Into<ItemId>, amount: i64) -> Self {
        self.consumes.insert(item.into(), amount);
        self
    }

    pub fn produces(mut self, item: impl Into<ItemId>, amount: i64) -> Self {
        self.produces.insert(item.into(), amount);
        self
    }

    /// The item this recipe is filed under: the first `Produces` entry.
    pub fn product(&self) -> Option<&ItemId> {
        self.produces.keys().next()
    }

    fn referenced(&self) -> impl Iterator<Item = (&ItemId, i64)> {
        self.requires
            .iter()
            .chain(&self.consumes)
            .chain(&self.produces)
            .map(|(item, amount)| (item, *amount))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<ItemId>,

    #[serde(default)]
    pub tools: Vec<ItemId>,

    #[serde(default)]
    pub initial: IndexMap<ItemId, i64>,

    #[serde(default)]
    pub goal: IndexMap<ItemId, i64>,

    #[serde(default)]
    pub recipes: IndexMap<String, Recipe>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog file; `.yaml`/`.yml` files are read as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml" | "yml")
        );
        let catalog = if is_yaml {
            Self::from_yaml_str(&raw)
                .with_context(|| format!("failed to parse catalog {}", path.display()))?
        } else {
            Self::from_json_str(&raw)
                .with_context(|| format!("failed to parse catalog {}", path.display()))?
        };
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    pub fn item(mut self, item: impl Into<ItemId>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn tool(mut self, tool: impl Into<ItemId>) -> Self {
        self.tools.push(tool.into());
        self
    }

    pub fn initial(mut self, item: impl Into<ItemId>, amount: i64) -> Self {
        self.initial.insert(item.into(), amount);
        self
    }

    pub fn goal(mut self, item: impl Into<ItemId>, amount: i64) -> Self {
        self.goal.insert(item.into(), amount);
        self
    }

    pub fn recipe(mut self, name: impl Into<String>, recipe: Recipe) -> Self {
        self.recipes.insert(name.into(), recipe);
        self
    }

    pub fn is_tool(&self, item: &str) -> bool {
        self.tools.iter().any(|tool| tool == item)
    }

    pub fn is_goal(&self, item: &str) -> bool {
        self.goal.contains_key(item)
    }

    /// Every identifier a state built from this catalog tracks, excluding `time`: Items, then
    /// Tools, then Initial keys, each listed once.
    pub fn tracked_items(&self) -> Vec<ItemId> {
        let mut seen = BTreeSet::new();
        self.items
            .iter()
            .chain(&self.tools)
            .chain(self.initial.keys())
            .filter(|item| seen.insert((*item).clone()))
            .cloned()
            .collect()
    }

    /// Reject catalogs that cannot be compiled.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let tracked = self.tracked_items();
        if let Some(item) = tracked.iter().find(|item| item.is_time()) {
            return Err(CatalogError::ReservedIdentifier { item: item.clone() });
        }
        let tracked: BTreeSet<ItemId> = tracked.into_iter().collect();

        for (item, &amount) in &self.goal {
            if !tracked.contains(item) {
                return Err(CatalogError::UnknownGoalItem { item: item.clone() });
            }
            if amount < 0 {
                return Err(CatalogError::NegativeGoal {
                    item: item.clone(),
                    amount,
                });
            }
        }

        let mut operators: IndexMap<OperatorName, &str> = IndexMap::new();
        for (name, recipe) in &self.recipes {
            if recipe.produces.is_empty() {
                return Err(CatalogError::NoProduct {
                    recipe: name.clone(),
                });
            }
            if recipe.time < 0 {
                return Err(CatalogError::NegativeTime {
                    recipe: name.clone(),
                    time: recipe.time,
                });
            }
            for (item, amount) in recipe.referenced() {
                if !tracked.contains(item) {
                    return Err(CatalogError::UnknownItem {
                        recipe: name.clone(),
                        item: item.clone(),
                    });
                }
                if amount < 0 {
                    return Err(CatalogError::NegativeAmount {
                        recipe: name.clone(),
                        item: item.clone(),
                        amount,
                    });
                }
            }

            let operator = OperatorName::for_recipe(name);
            if let Some(first) = operators.get(&operator) {
                return Err(CatalogError::DuplicateOperator {
                    operator,
                    first: (*first).to_string(),
                    second: name.clone(),
                });
            }
            operators.insert(operator, name);
        }

        Ok(())
    }
}

mod amounts {
    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer};

    use crate::id::ItemId;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Count(i64),
        Flag(bool),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<IndexMap<ItemId, i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<ItemId, Amount>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(item, amount)| {
                let amount = match amount {
                    Amount::Count(n) => n,
                    Amount::Flag(true) => 1,
                    Amount::Flag(false) => 0,
                };
                (item, amount)
            })
            .collect())
    }
}
