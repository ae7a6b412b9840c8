//! Domain tuning loaded from YAML: crafting order and heuristic cutoffs.

use std::path::Path;

use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::id::ItemId;

/// Compile-time settings for a [`crate::CraftingDomain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Order in which a recipe's consumed items are secured. Items not listed follow in their
    /// declared order.
    pub crafting_order: Vec<ItemId>,

    pub heuristic: HeuristicConfig,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            crafting_order: ["ingot", "coal", "ore", "cobble", "stick", "plank", "wood"]
                .into_iter()
                .map(ItemId::from)
                .collect(),
            heuristic: HeuristicConfig::default(),
        }
    }
}

impl DomainConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read domain config {}", path.display()))?;
        Self::from_yaml_str(&raw)
            .with_context(|| format!("failed to parse domain config {}", path.display()))
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(raw)?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Search depth beyond which every branch is pruned.
    pub max_depth: usize,

    /// A task repeated as the last `max_repetitions` ancestors is pruned.
    pub max_repetitions: usize,

    /// Tools that are only worth producing when enough remaining work benefits from them.
    pub cutoffs: IndexMap<ItemId, CostCutoff>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        let cutoffs = [
            (
                "iron_pickaxe",
                CostCutoff::new(18)
                    .weight("coal", 1)
                    .weight("ingot", 2)
                    .weight("cobble", 1),
            ),
            ("stone_pickaxe", CostCutoff::new(7).weight("cobble", 1)),
            ("wooden_axe", CostCutoff::new(10).weight("wood", 1).weight("plank", 1)),
            ("stone_axe", CostCutoff::new(12).weight("wood", 1).weight("plank", 1)),
            ("iron_axe", CostCutoff::new(20).weight("wood", 1).weight("plank", 1)),
        ]
        .into_iter()
        .map(|(tool, cutoff)| (ItemId::from(tool), cutoff))
        .collect();

        Self {
            max_depth: 900,
            max_repetitions: 10,
            cutoffs,
        }
    }
}

/// Prune producing a tool unless the weighted outstanding demand exceeds `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCutoff {
    pub threshold: i64,

    #[serde(default)]
    pub weights: IndexMap<ItemId, i64>,
}

impl CostCutoff {
    pub fn new(threshold: i64) -> Self {
        Self {
            threshold,
            weights: IndexMap::new(),
        }
    }

    pub fn weight(mut self, item: impl Into<ItemId>, weight: i64) -> Self {
        self.weights.insert(item.into(), weight);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_standard_tools() {
        let config = DomainConfig::default();
        let tools: Vec<&str> = config.heuristic.cutoffs.keys().map(ItemId::as_str).collect();
        assert_eq!(
            tools,
            vec!["iron_pickaxe", "stone_pickaxe", "wooden_axe", "stone_axe", "iron_axe"]
        );
        assert_eq!(config.heuristic.cutoffs["iron_pickaxe"].weights["ingot"], 2);
        assert_eq!(config.heuristic.max_depth, 900);
        assert_eq!(config.crafting_order.first().map(ItemId::as_str), Some("ingot"));
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let config = DomainConfig::from_yaml_str(
            r#"
heuristic:
  max_depth: 50
  cutoffs:
    stone_pickaxe:
      threshold: 3
      weights: { cobble: 2 }
"#,
        )
        .unwrap();

        assert_eq!(config.heuristic.max_depth, 50);
        assert_eq!(config.heuristic.max_repetitions, 10);
        assert_eq!(config.heuristic.cutoffs.len(), 1);
        assert_eq!(
            config.heuristic.cutoffs["stone_pickaxe"],
            CostCutoff::new(3).weight("cobble", 2)
        );
        assert_eq!(config.crafting_order, DomainConfig::default().crafting_order);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = DomainConfig::load_or_default("/nonexistent/craft-htn.yaml").unwrap();
        assert_eq!(config, DomainConfig::default());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = DomainConfig::from_yaml_str("heuristic: [1, 2").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
