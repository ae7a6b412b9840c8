use std::fmt;

use htn_core::AgentId;
use htn_planner::HtnTask;

use crate::id::{ItemId, OperatorName};

/// Crafting tasks.
///
/// `HaveEnough` and `Produce` are shared compound tasks; `ProduceItem` dispatches to the recipe
/// methods for one product; `Apply` runs one recipe operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CraftTask<A> {
    HaveEnough { agent: A, item: ItemId, count: i64 },
    Produce { agent: A, item: ItemId },
    ProduceItem { agent: A, item: ItemId },
    Apply { agent: A, operator: OperatorName },
}

/// Handler table key for a [`CraftTask`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskKey {
    HaveEnough,
    Produce,
    ProduceItem(ItemId),
    Operator(OperatorName),
}

impl<A> CraftTask<A> {
    pub fn have_enough(agent: A, item: impl Into<ItemId>, count: i64) -> Self {
        Self::HaveEnough {
            agent,
            item: item.into(),
            count,
        }
    }

    pub fn produce(agent: A, item: impl Into<ItemId>) -> Self {
        Self::Produce {
            agent,
            item: item.into(),
        }
    }

    pub fn produce_item(agent: A, item: impl Into<ItemId>) -> Self {
        Self::ProduceItem {
            agent,
            item: item.into(),
        }
    }

    pub fn apply(agent: A, operator: OperatorName) -> Self {
        Self::Apply { agent, operator }
    }

    pub fn agent(&self) -> &A {
        match self {
            Self::HaveEnough { agent, .. }
            | Self::Produce { agent, .. }
            | Self::ProduceItem { agent, .. }
            | Self::Apply { agent, .. } => agent,
        }
    }

    /// The item the task is about; `None` for operator applications.
    pub fn item(&self) -> Option<&ItemId> {
        match self {
            Self::HaveEnough { item, .. }
            | Self::Produce { item, .. }
            | Self::ProduceItem { item, .. } => Some(item),
            Self::Apply { .. } => None,
        }
    }

    pub fn operator(&self) -> Option<&OperatorName> {
        match self {
            Self::Apply { operator, .. } => Some(operator),
            _ => None,
        }
    }

    pub fn task_key(&self) -> TaskKey {
        match self {
            Self::HaveEnough { .. } => TaskKey::HaveEnough,
            Self::Produce { .. } => TaskKey::Produce,
            Self::ProduceItem { item, .. } => TaskKey::ProduceItem(item.clone()),
            Self::Apply { operator, .. } => TaskKey::Operator(operator.clone()),
        }
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HaveEnough => f.write_str("have_enough"),
            Self::Produce => f.write_str("produce"),
            Self::ProduceItem(item) => write!(f, "produce_{item}"),
            Self::Operator(operator) => write!(f, "{operator}"),
        }
    }
}

/// Tuple rendering, e.g. `(have_enough, "agent", wood, 1)`.
impl<A: fmt::Debug> fmt::Display for CraftTask<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HaveEnough { agent, item, count } => {
                write!(f, "(have_enough, {agent:?}, {item}, {count})")
            }
            Self::Produce { agent, item } => write!(f, "(produce, {agent:?}, {item})"),
            Self::ProduceItem { agent, item } => write!(f, "(produce_{item}, {agent:?})"),
            Self::Apply { agent, operator } => write!(f, "({operator}, {agent:?})"),
        }
    }
}

impl<A: AgentId> HtnTask for CraftTask<A> {
    type Key = TaskKey;

    fn key(&self) -> TaskKey {
        self.task_key()
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_use_tuple_form() {
        let task = CraftTask::have_enough("agent", "wood", 3);
        assert_eq!(task.label(), "(have_enough, \"agent\", wood, 3)");
        assert_eq!(
            CraftTask::produce_item("agent", "plank").label(),
            "(produce_plank, \"agent\")"
        );
        assert_eq!(
            CraftTask::apply(1u32, OperatorName::for_recipe("craft plank")).label(),
            "(op_craft_plank, 1)"
        );
    }

    #[test]
    fn keys_select_handler_tables() {
        assert_eq!(CraftTask::produce(7u64, "wood").key(), TaskKey::Produce);
        assert_eq!(
            CraftTask::produce_item(7u64, "wood").key(),
            TaskKey::ProduceItem(ItemId::from("wood"))
        );
        assert_eq!(TaskKey::ProduceItem(ItemId::from("wood")).to_string(), "produce_wood");
    }
}
