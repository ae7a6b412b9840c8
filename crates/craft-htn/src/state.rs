//! Per-agent inventory and time budget.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use htn_core::AgentId;
use indexmap::IndexMap;

use crate::error::StateError;
use crate::id::ItemId;

/// Inventory counts indexed by item, then agent. The time budget is stored under
/// [`crate::TIME`] alongside the items.
///
/// Every agent seeded into the state has an entry for every tracked item, so reads of tracked
/// items never miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftState<A: AgentId> {
    name: String,
    counts: BTreeMap<ItemId, BTreeMap<A, i64>>,
}

impl<A: AgentId> CraftState<A> {
    /// An empty state tracking `items` plus time, with no agents yet.
    pub fn new(name: impl Into<String>, items: impl IntoIterator<Item = ItemId>) -> Self {
        let mut counts: BTreeMap<ItemId, BTreeMap<A, i64>> = items
            .into_iter()
            .map(|item| (item, BTreeMap::new()))
            .collect();
        counts.entry(ItemId::time()).or_default();
        Self {
            name: name.into(),
            counts,
        }
    }

    /// Give `agent` a zeroed inventory, then apply `initial` and the time budget. Entries of
    /// `initial` for untracked items are ignored.
    pub fn seed_agent(&mut self, agent: A, initial: &IndexMap<ItemId, i64>, time: i64) {
        for (item, per_agent) in self.counts.iter_mut() {
            let count = if item.is_time() {
                time
            } else {
                initial.get(item).copied().unwrap_or(0)
            };
            per_agent.insert(agent.clone(), count);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Count of `item` held by `agent`; untracked items and unknown agents read as 0.
    pub fn get<Q>(&self, item: &Q, agent: &A) -> i64
    where
        ItemId: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.try_get(item, agent).unwrap_or(0)
    }

    pub fn try_get<Q>(&self, item: &Q, agent: &A) -> Option<i64>
    where
        ItemId: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.counts.get(item)?.get(agent).copied()
    }

    pub fn time(&self, agent: &A) -> i64 {
        self.get(crate::id::TIME, agent)
    }

    pub fn has_agent(&self, agent: &A) -> bool {
        self.counts
            .values()
            .next()
            .is_some_and(|per_agent| per_agent.contains_key(agent))
    }

    pub fn tracks<Q>(&self, item: &Q) -> bool
    where
        ItemId: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.counts.contains_key(item)
    }

    /// Tracked identifiers in sorted order, `time` included.
    pub fn items(&self) -> impl Iterator<Item = &ItemId> {
        self.counts.keys()
    }

    pub fn set<Q>(&mut self, item: &Q, agent: &A, count: i64) -> Result<(), StateError>
    where
        ItemId: Borrow<Q>,
        Q: Ord + fmt::Display + ?Sized,
    {
        *self.slot(item, agent)? = count;
        Ok(())
    }

    /// Add `delta` to a count, saturating at the `i64` bounds.
    pub fn apply_delta<Q>(&mut self, item: &Q, agent: &A, delta: i64) -> Result<(), StateError>
    where
        ItemId: Borrow<Q>,
        Q: Ord + fmt::Display + ?Sized,
    {
        let slot = self.slot(item, agent)?;
        *slot = slot.saturating_add(delta);
        Ok(())
    }

    /// Apply every delta or none of them.
    pub fn apply_deltas(&mut self, agent: &A, deltas: &[(ItemId, i64)]) -> Result<(), StateError> {
        for (item, _) in deltas {
            if self.try_get(item, agent).is_none() {
                return Err(self.missing(item.as_str(), agent));
            }
        }
        for (item, delta) in deltas {
            self.apply_delta(item, agent, *delta)?;
        }
        Ok(())
    }

    fn slot<Q>(&mut self, item: &Q, agent: &A) -> Result<&mut i64, StateError>
    where
        ItemId: Borrow<Q>,
        Q: Ord + fmt::Display + ?Sized,
    {
        if !self.has_agent(agent) {
            return Err(StateError::UnknownAgent {
                agent: format!("{agent:?}"),
            });
        }
        self.counts
            .get_mut(item)
            .and_then(|per_agent| per_agent.get_mut(agent))
            .ok_or_else(|| StateError::UnknownItem {
                item: item.to_string(),
            })
    }

    fn missing(&self, item: &str, agent: &A) -> StateError {
        if self.has_agent(agent) {
            StateError::UnknownItem {
                item: item.to_string(),
            }
        } else {
            StateError::UnknownAgent {
                agent: format!("{agent:?}"),
            }
        }
    }
}

/// One line per tracked identifier: `<name>.<item> = {<agent>: <count>}`.
impl<A: AgentId> fmt::Display for CraftState<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (item, per_agent) in &self.counts {
            write!(f, "{}.{} = {{", self.name, item)?;
            for (i, (agent, count)) in per_agent.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{agent:?}: {count}")?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}
